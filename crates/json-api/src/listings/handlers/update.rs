//! Update Listing Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navi_app::domain::listings::data::ListingUpdate;

use crate::{
    extensions::*,
    listings::{
        errors::into_status_error,
        get::ListingResponse,
        models::{ImageBody, InventoryBody, StatusBody, nullable},
    },
    state::State,
};

/// Update Listing Request
///
/// Absent fields are left unchanged. An explicit `null` description clears
/// it. `images` and `keywords` replace the whole set when present; an empty
/// list clears it.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateListingRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub inventory: Option<InventoryBody>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[salvo(schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<StatusBody>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<ImageBody>>,
}

impl From<UpdateListingRequest> for ListingUpdate {
    fn from(request: UpdateListingRequest) -> Self {
        ListingUpdate {
            name: request.name,
            price: request.price,
            inventory: request.inventory.map(Into::into),
            description: request.description,
            status: request.status.map(Into::into),
            keywords: request.keywords,
            images: request
                .images
                .map(|images| images.into_iter().map(Into::into).collect()),
        }
    }
}

/// Listing Update Handler
#[endpoint(
    tags("listings"),
    summary = "Update Listing",
    responses(
        (status_code = StatusCode::OK, description = "Listing updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Listing not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Keyword could not be resolved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "listings.update",
    skip(listing, json, depot),
    fields(
        listing_uuid = tracing::field::Empty,
        replaces_images = tracing::field::Empty,
        replaces_keywords = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    listing: PathParam<Uuid>,
    json: JsonBody<UpdateListingRequest>,
    depot: &mut Depot,
) -> Result<Json<ListingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let listing = listing.into_inner();

    let span = tracing::Span::current();

    span.record("listing_uuid", tracing::field::display(listing));
    span.record("replaces_images", request.images.is_some());
    span.record("replaces_keywords", request.keywords.is_some());

    let updated = state
        .listings
        .update_listing(listing.into(), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
