//! Get Listing Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navi_app::domain::listings::records::{ImageRecord, Listing};

use crate::{
    extensions::*,
    keywords::KeywordResponse,
    listings::{
        errors::into_status_error,
        models::{InventoryBody, StatusBody},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageResponse {
    pub uuid: Uuid,
    pub url: String,
    pub alt: String,
}

impl From<ImageRecord> for ImageResponse {
    fn from(image: ImageRecord) -> Self {
        ImageResponse {
            uuid: image.uuid.into(),
            url: image.url,
            alt: image.alt,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListingResponse {
    /// The unique identifier of the listing
    pub uuid: Uuid,

    pub name: String,

    /// The price of the listing in minor currency units
    pub price: u64,

    /// Stock or rental period, tagged by listing kind
    pub inventory: InventoryBody,

    pub description: Option<String>,

    pub status: StatusBody,

    /// Images in display order
    pub images: Vec<ImageResponse>,

    /// Keywords in the order they were supplied
    pub keywords: Vec<KeywordResponse>,

    /// The date and time the listing was created
    pub created_at: String,

    /// The date and time the listing was last updated
    pub updated_at: String,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        let Listing {
            record,
            images,
            keywords,
        } = listing;

        ListingResponse {
            uuid: record.uuid.into(),
            name: record.name,
            price: record.price,
            inventory: record.inventory.into(),
            description: record.description,
            status: record.status.into(),
            images: images.into_iter().map(Into::into).collect(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Get Listing Handler
///
/// Returns a listing with its images and keywords.
#[endpoint(
    tags("listings"),
    summary = "Get Listing",
    responses(
        (status_code = StatusCode::OK, description = "Listing found"),
        (status_code = StatusCode::NOT_FOUND, description = "Listing not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    listing: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ListingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listing = state
        .listings
        .get_listing(listing.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(listing.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use navi_app::domain::listings::{
        ListingsServiceError, MockListingsService, records::ListingUuid,
    };

    use crate::test_helpers::{listings_service, make_listing};

    use super::*;

    fn make_service(repo: MockListingsService) -> Service {
        listings_service(repo, Router::with_path("listings/{listing}").get(handler))
    }

    #[tokio::test]
    async fn test_get_listing_success() -> TestResult {
        let uuid = ListingUuid::new();
        let listing = make_listing(uuid);

        let mut repo = MockListingsService::new();

        repo.expect_get_listing()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(listing));

        repo.expect_list_listings().never();
        repo.expect_create_listing().never();
        repo.expect_update_listing().never();
        repo.expect_delete_listing().never();

        let mut res = TestClient::get(format!("http://example.com/listings/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: ListingResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.inventory, InventoryBody::Sale { stock: 1 });
        assert_eq!(body.status, StatusBody::Sell);
        assert_eq!(
            body.keywords
                .iter()
                .map(|k| k.name.as_str())
                .collect::<Vec<_>>(),
            vec!["furniture", "home"]
        );
        assert_eq!(body.images.first().map(|i| i.alt.as_str()), Some("Desk"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_listing_not_found_returns_404() -> TestResult {
        let uuid = ListingUuid::new();

        let mut repo = MockListingsService::new();

        repo.expect_get_listing()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(ListingsServiceError::NotFound));

        repo.expect_list_listings().never();
        repo.expect_create_listing().never();
        repo.expect_update_listing().never();
        repo.expect_delete_listing().never();

        let res = TestClient::get(format!("http://example.com/listings/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_listing_invalid_uuid_returns_400() -> TestResult {
        let mut repo = MockListingsService::new();

        repo.expect_get_listing().never();
        repo.expect_list_listings().never();
        repo.expect_create_listing().never();
        repo.expect_update_listing().never();
        repo.expect_delete_listing().never();

        let res = TestClient::get("http://example.com/listings/not-a-uuid")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
