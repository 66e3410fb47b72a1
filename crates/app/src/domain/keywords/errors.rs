//! Keywords service errors.

use thiserror::Error;

use crate::domain::listings::validation::ValidationError;

#[derive(Debug, Error)]
pub enum KeywordsServiceError {
    /// The keyword name failed validation; nothing was written.
    #[error("invalid keyword: {0}")]
    Validation(#[from] ValidationError),

    /// The keyword could not be found or created; the transaction was rolled back.
    #[error("keyword could not be resolved: {0}")]
    Unresolved(String),

    #[error("keyword transaction failed")]
    Transaction(#[from] sqlx::Error),
}
