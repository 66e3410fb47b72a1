//! Keyword Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use navi_app::domain::keywords::KeywordsServiceError;

pub(crate) fn into_status_error(error: KeywordsServiceError) -> StatusError {
    match error {
        KeywordsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        KeywordsServiceError::Unresolved(name) => {
            warn!(keyword = %name, "keyword could not be resolved");

            StatusError::conflict().brief("Keyword could not be resolved, retry the request")
        }
        KeywordsServiceError::Transaction(source) => {
            error!("keyword transaction failed: {source}");

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
        let status = into_status_error(KeywordsServiceError::Validation(
            ValidationError::BlankKeyword { index: 0 },
        ));

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "keyword 0 is blank");
    }

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (
                KeywordsServiceError::Unresolved("home".to_owned()),
                StatusCode::CONFLICT,
            ),
            (
                KeywordsServiceError::Transaction(DbError::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}
