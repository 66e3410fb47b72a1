//! Create Keyword Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    keywords::{errors::into_status_error, models::KeywordResponse},
    state::State,
};

/// Create Keyword Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateKeywordRequest {
    /// Keyword name; surrounding whitespace is trimmed
    pub name: String,
}

/// Create Keyword Handler
///
/// Returns the existing keyword when the name is already in the catalog.
#[endpoint(
    tags("keywords"),
    summary = "Create Keyword",
    responses(
        (status_code = StatusCode::CREATED, description = "Keyword created or found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Keyword could not be resolved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "keywords.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateKeywordRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<KeywordResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let keyword = state
        .keywords
        .create_keyword(json.into_inner().name)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(keyword.into()))
}
