//! Delete Listing Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, listings::errors::into_status_error, state::State};

/// Delete Listing Handler
///
/// Removes the listing together with its images and keyword links.
#[endpoint(
    tags("listings"),
    summary = "Delete Listing",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Listing deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Listing not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    listing: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .listings
        .delete_listing(listing.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use navi_app::domain::listings::{
        ListingsServiceError, MockListingsService, records::ListingUuid,
    };

    use crate::test_helpers::listings_service;

    use super::*;

    fn make_service(repo: MockListingsService) -> Service {
        listings_service(repo, Router::with_path("listings/{listing}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_listing_success() -> TestResult {
        let uuid = ListingUuid::new();

        let mut repo = MockListingsService::new();

        repo.expect_delete_listing()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        repo.expect_get_listing().never();
        repo.expect_create_listing().never();
        repo.expect_list_listings().never();
        repo.expect_update_listing().never();

        let res = TestClient::delete(format!("http://example.com/listings/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_listing_not_found_returns_404() -> TestResult {
        let uuid = ListingUuid::new();

        let mut repo = MockListingsService::new();

        repo.expect_delete_listing()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(ListingsServiceError::NotFound));

        repo.expect_get_listing().never();
        repo.expect_create_listing().never();
        repo.expect_list_listings().never();
        repo.expect_update_listing().never();

        let res = TestClient::delete(format!("http://example.com/listings/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_listing_invalid_uuid_returns_400() -> TestResult {
        let mut repo = MockListingsService::new();

        repo.expect_get_listing().never();
        repo.expect_create_listing().never();
        repo.expect_list_listings().never();
        repo.expect_update_listing().never();
        repo.expect_delete_listing().never();

        let res = TestClient::delete("http://example.com/listings/123")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
