use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum SalonError {
    /// A client, master or service id passed to a booking does not exist.
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for SalonError {
    fn from(err: StoreError) -> Self {
        match err {
            slot @ StoreError::SlotTaken { .. } => SalonError::Conflict(slot.to_string()),
            StoreError::Backend(report) => SalonError::Database(report),
        }
    }
}

pub type SalonResult<T> = Result<T, SalonError>;
