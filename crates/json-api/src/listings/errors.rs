//! Listing Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use navi_app::domain::listings::ListingsServiceError;

pub(crate) fn into_status_error(error: ListingsServiceError) -> StatusError {
    match error {
        ListingsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ListingsServiceError::NotFound => StatusError::not_found().brief("Listing not found"),
        ListingsServiceError::KeywordUnresolved(name) => {
            warn!(keyword = %name, "keyword could not be resolved");

            StatusError::conflict().brief("Keyword could not be resolved, retry the request")
        }
        ListingsServiceError::Transaction(source) => {
            error!("listing transaction failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use navi_app::{database::DbError, domain::listings::validation::ValidationError};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_error_maps_to_400_with_message() {
        let status = into_status_error(ListingsServiceError::Validation(
            ValidationError::NonPositivePrice,
        ));

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "price must be greater than zero");
    }

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ListingsServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                ListingsServiceError::KeywordUnresolved("home".to_owned()),
                StatusCode::CONFLICT,
            ),
            (
                ListingsServiceError::Transaction(DbError::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}
