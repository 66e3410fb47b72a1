//! Listings service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::listings::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ListingsServiceError {
    /// Input failed validation; nothing was written.
    #[error("invalid listing: {0}")]
    Validation(#[from] ValidationError),

    /// The listing does not exist or has been deleted.
    #[error("listing not found")]
    NotFound,

    /// A keyword could not be found or created; the transaction was rolled back.
    #[error("keyword could not be resolved: {0}")]
    KeywordUnresolved(String),

    /// A storage operation failed; the transaction was rolled back.
    #[error("listing transaction failed")]
    Transaction(#[source] Error),
}

impl From<Error> for ListingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Transaction(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = ListingsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, ListingsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn other_storage_errors_map_to_transaction_failure() {
        let error = ListingsServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, ListingsServiceError::Transaction(Error::PoolTimedOut)),
            "expected Transaction, got {error:?}"
        );
    }
}
