//! State

use std::sync::Arc;

use navi_app::{
    context::AppContext,
    domain::{keywords::KeywordsService, listings::ListingsService},
};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) listings: Arc<dyn ListingsService>,
    pub(crate) keywords: Arc<dyn KeywordsService>,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        listings: Arc<dyn ListingsService>,
        keywords: Arc<dyn KeywordsService>,
    ) -> Self {
        Self { listings, keywords }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: &AppContext) -> Arc<Self> {
        Arc::new(Self::new(
            Arc::clone(&app.listings),
            Arc::clone(&app.keywords),
        ))
    }
}
