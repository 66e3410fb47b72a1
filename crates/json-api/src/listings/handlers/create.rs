//! Create Listing Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use navi_app::domain::listings::data::NewListing;

use crate::{
    extensions::*,
    listings::{
        errors::into_status_error,
        get::ListingResponse,
        models::{ImageBody, InventoryBody, StatusBody},
    },
    state::State,
};

/// Create Listing Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateListingRequest {
    pub name: String,
    pub price: u64,
    pub inventory: InventoryBody,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `sell`
    #[serde(default)]
    pub status: Option<StatusBody>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageBody>,
}

impl From<CreateListingRequest> for NewListing {
    fn from(request: CreateListingRequest) -> Self {
        NewListing {
            name: request.name,
            price: request.price,
            inventory: request.inventory.into(),
            description: request.description,
            status: request.status.map(Into::into),
            keywords: request.keywords,
            images: request.images.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Listing Handler
///
/// Creates the listing, its images and its keyword links in one transaction.
#[endpoint(
    tags("listings"),
    summary = "Create Listing",
    responses(
        (status_code = StatusCode::CREATED, description = "Listing created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Keyword could not be resolved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "listings.create",
    skip(json, depot, res),
    fields(
        listing_uuid = tracing::field::Empty,
        image_count = tracing::field::Empty,
        keyword_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateListingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ListingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("image_count", request.images.len());
    span.record("keyword_count", request.keywords.len());

    let listing = state
        .listings
        .create_listing(request.into())
        .await
        .map_err(into_status_error)?;

    let uuid = listing.uuid();

    span.record("listing_uuid", tracing::field::display(uuid));

    res.add_header(LOCATION, format!("/listings/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(listing.into()))
}
