//! Service layer driving the view controllers for route handlers.

use thiserror::Error;

use crate::domain::state::ErrorInfo;

pub mod collections;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The view failed and must navigate to the error route with this info.
    #[error("view failed: {0}")]
    Failed(ErrorInfo),
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),
    /// The controller finished its trigger without settling on a state.
    #[error("view did not settle")]
    Unsettled,
}

impl ServiceError {
    /// Error info shown on the error route for this failure.
    pub fn error_info(&self) -> ErrorInfo {
        match self {
            ServiceError::Failed(info) => info.clone(),
            ServiceError::UnknownCollection(_) => ErrorInfo::not_found(),
            ServiceError::Unsettled => ErrorInfo::new(500, "Internal Server Error"),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
