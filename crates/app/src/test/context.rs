//! Test context for service-level integration tests.

use crate::domain::{
    keywords::PgKeywordsService,
    listings::{DeletePolicy, PgListingsService},
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub listings: PgListingsService,
    pub keywords: PgKeywordsService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        Self::with_delete_policy(DeletePolicy::default()).await
    }

    pub(crate) async fn with_delete_policy(delete_policy: DeletePolicy) -> Self {
        let db = TestDb::new().await;

        Self {
            listings: PgListingsService::new(db.db()).with_delete_policy(delete_policy),
            keywords: PgKeywordsService::new(db.db()),
            db,
        }
    }
}
