//! Listing Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use navi_app::domain::listings::{
    data::{DEFAULT_PAGE_LIMIT, ListingsQuery},
    records::ListingsPage,
};

use crate::{
    extensions::*,
    listings::{
        errors::into_status_error,
        get::ListingResponse,
        models::{parse_kind, parse_status},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListingsResponse {
    /// The listings on this page, newest first
    pub listings: Vec<ListingResponse>,

    /// Number of listings matching the filters
    pub total: u64,

    pub page: u32,

    pub limit: u32,

    pub total_pages: u64,
}

impl From<ListingsPage> for ListingsResponse {
    fn from(page: ListingsPage) -> Self {
        ListingsResponse {
            listings: page.listings.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Listing Index Handler
///
/// Returns one page of listings, optionally filtered by status, kind and a
/// search term matched against name and description.
#[endpoint(
    tags("listings"),
    summary = "List Listings",
    responses(
        (status_code = StatusCode::OK, description = "Listings page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    status: QueryParam<String, false>,
    kind: QueryParam<String, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ListingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = parse_status(status.as_deref())
        .map_err(|message| StatusError::bad_request().brief(message))?;

    let kind =
        parse_kind(kind.as_deref()).map_err(|message| StatusError::bad_request().brief(message))?;

    let listings_query = ListingsQuery {
        page: page.into_inner().unwrap_or(1),
        limit: limit.into_inner().unwrap_or(DEFAULT_PAGE_LIMIT),
        status,
        kind,
        search: search.into_inner(),
    };

    let page = state
        .listings
        .list_listings(listings_query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
