//! App Router

use salvo::{
    Router,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
};

use crate::{healthcheck, keywords, listings, observability::metrics_handler};

/// Listing and keyword routes.
pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("keywords")
                .get(keywords::index::handler)
                .post(keywords::create::handler),
        )
        .push(
            Router::with_path("listings")
                .get(listings::index::handler)
                .post(listings::create::handler)
                .push(
                    Router::with_path("{listing}")
                        .get(listings::get::handler)
                        .put(listings::update::handler)
                        .delete(listings::delete::handler),
                ),
        )
}

/// Every route the server exposes, including health, metrics and API docs.
pub fn service_router() -> Router {
    let router = Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(app_router());

    let doc = OpenApi::new("Navi API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

#[cfg(test)]
mod tests {
    use salvo::{
        Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn openapi_document_lists_catalog_routes() -> TestResult {
        let doc: serde_json::Value = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&Service::new(service_router()))
            .await
            .take_json()
            .await?;

        let paths = doc.get("paths").and_then(|p| p.as_object());

        assert!(
            paths.is_some_and(|p| {
                p.contains_key("/listings")
                    && p.contains_key("/listings/{listing}")
                    && p.contains_key("/keywords")
            }),
            "expected catalog paths in {doc}"
        );

        Ok(())
    }
}
