//! Maps failed controller states to a one-time navigation to the error view.

use crate::controller::Generation;
use crate::domain::state::{ControllerState, ErrorInfo};

/// Route of the error surface.
pub const ERROR_ROUTE: &str = "/error";

/// Navigation requested by a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Go to [`ERROR_ROUTE`] carrying `ErrorInfo` as transient state.
    Error(ErrorInfo),
}

/// Remembers which failure it already routed so each failure navigates at
/// most once.
#[derive(Debug, Default)]
pub struct ErrorRouter {
    routed: Option<Generation>,
}

impl ErrorRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the navigation for `state` produced by the trigger `generation`,
    /// or `None` when the state is not a failure or the failure was already
    /// routed.
    pub fn observe<T>(
        &mut self,
        generation: Generation,
        state: &ControllerState<T>,
    ) -> Option<Navigation> {
        let info = state.error()?;
        if self.routed == Some(generation) {
            return None;
        }
        self.routed = Some(generation);
        log::info!("Routing failure {info} to {ERROR_ROUTE}");
        Some(Navigation::Error(info.clone()))
    }
}
