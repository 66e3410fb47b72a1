//! Keyword Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    keywords::{errors::into_status_error, models::KeywordResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct KeywordsResponse {
    /// Every keyword in the catalog, sorted by name
    pub keywords: Vec<KeywordResponse>,
}

/// Keyword Index Handler
///
/// Lists the keywords clients can offer when tagging a listing.
#[endpoint(
    tags("keywords"),
    summary = "List Keywords",
    responses(
        (status_code = StatusCode::OK, description = "Keywords sorted by name"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<KeywordsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let keywords = state
        .keywords
        .list_keywords()
        .await
        .map_err(into_status_error)?;

    Ok(Json(KeywordsResponse {
        keywords: keywords.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use navi_app::{
        database::DbError,
        domain::keywords::{
            KeywordsServiceError, MockKeywordsService,
            records::{KeywordRecord, KeywordUuid},
        },
    };

    use crate::test_helpers::keywords_service;

    use super::*;

    fn make_service(repo: MockKeywordsService) -> Service {
        keywords_service(repo, Router::with_path("keywords").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_keywords_in_service_order() -> TestResult {
        let desk = KeywordUuid::new();
        let home = KeywordUuid::new();

        let mut repo = MockKeywordsService::new();

        repo.expect_list_keywords().once().return_once(move || {
            Ok(vec![
                KeywordRecord {
                    uuid: desk,
                    name: "desk".to_owned(),
                },
                KeywordRecord {
                    uuid: home,
                    name: "home".to_owned(),
                },
            ])
        });

        repo.expect_create_keyword().never();

        let response: KeywordsResponse = TestClient::get("http://example.com/keywords")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        let keywords: Vec<_> = response
            .keywords
            .iter()
            .map(|k| (k.uuid, k.name.as_str()))
            .collect();

        assert_eq!(
            keywords,
            vec![(desk.into_uuid(), "desk"), (home.into_uuid(), "home")]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_empty_catalog() -> TestResult {
        let mut repo = MockKeywordsService::new();

        repo.expect_list_keywords()
            .once()
            .return_once(|| Ok(vec![]));

        repo.expect_create_keyword().never();

        let response: KeywordsResponse = TestClient::get("http://example.com/keywords")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert!(response.keywords.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut repo = MockKeywordsService::new();

        repo.expect_list_keywords()
            .once()
            .return_once(|| Err(KeywordsServiceError::Transaction(DbError::PoolTimedOut)));

        repo.expect_create_keyword().never();

        let res = TestClient::get("http://example.com/keywords")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
