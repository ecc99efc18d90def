//! View state shared by the list and detail controllers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Status code and message shown on the error surface.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: u16,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Outcome of a detail lookup that matched nothing.
    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// Exactly one of loading, settled with a value, or failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ControllerState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(ErrorInfo),
}

impl<T> ControllerState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ControllerState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ControllerState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            ControllerState::Failed(info) => Some(info),
            _ => None,
        }
    }
}
