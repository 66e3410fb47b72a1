//! Keywords service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        keywords::{KeywordsServiceError, PgKeywordsRepository, records::KeywordRecord},
        listings::validation::{ValidationError, normalise_keywords},
    },
};

#[derive(Debug, Clone)]
pub struct PgKeywordsService {
    db: Db,
    repository: PgKeywordsRepository,
}

impl PgKeywordsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgKeywordsRepository::new(),
        }
    }
}

#[async_trait]
impl KeywordsService for PgKeywordsService {
    async fn list_keywords(&self) -> Result<Vec<KeywordRecord>, KeywordsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let keywords = self.repository.list_keywords(&mut tx).await?;

        tx.commit().await?;

        Ok(keywords)
    }

    async fn create_keyword(&self, name: String) -> Result<KeywordRecord, KeywordsServiceError> {
        let names = normalise_keywords(std::slice::from_ref(&name))?;

        let Some(name) = names.first().copied() else {
            return Err(ValidationError::BlankKeyword { index: 0 }.into());
        };

        let mut tx = self.db.begin().await?;

        let uuid = self
            .repository
            .find_or_create_keywords(&mut tx, &[name])
            .await?
            .get(name)
            .copied()
            .ok_or_else(|| KeywordsServiceError::Unresolved(name.to_owned()))?;

        tx.commit().await?;

        info!(keyword_uuid = %uuid, "resolved keyword");

        Ok(KeywordRecord {
            uuid,
            name: name.to_owned(),
        })
    }
}

#[automock]
#[async_trait]
pub trait KeywordsService: Send + Sync {
    /// Every keyword in the catalog, sorted by name.
    async fn list_keywords(&self) -> Result<Vec<KeywordRecord>, KeywordsServiceError>;

    /// Return the keyword with this name, creating it when it does not exist yet.
    async fn create_keyword(&self, name: String) -> Result<KeywordRecord, KeywordsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::listings::{ListingsService, data::NewListing},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn list_keywords_is_sorted_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.listings
            .create_listing(NewListing {
                keywords: vec!["office".to_owned(), "desk".to_owned(), "home".to_owned()],
                ..helpers::desk()
            })
            .await?;

        let keywords = ctx.keywords.list_keywords().await?;

        let names: Vec<&str> = keywords.iter().map(|k| k.name.as_str()).collect();

        assert_eq!(names, vec!["desk", "home", "office"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_keywords_keeps_keywords_of_deleted_listings() -> TestResult {
        let ctx = TestContext::new().await;

        let listing = ctx.listings.create_listing(helpers::desk()).await?;

        ctx.listings.delete_listing(listing.uuid()).await?;

        let keywords = ctx.keywords.list_keywords().await?;

        assert_eq!(keywords.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn list_keywords_empty_catalog() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.keywords.list_keywords().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_keyword_trims_and_reuses_existing_row() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.keywords.create_keyword(" lighting ".to_owned()).await?;
        let again = ctx.keywords.create_keyword("lighting".to_owned()).await?;

        assert_eq!(created.name, "lighting");
        assert_eq!(created.uuid, again.uuid);
        assert_eq!(helpers::keyword_rows_named(&ctx, "lighting").await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_keyword_is_shared_with_listings() -> TestResult {
        let ctx = TestContext::new().await;

        let keyword = ctx.keywords.create_keyword("furniture".to_owned()).await?;
        let listing = ctx.listings.create_listing(helpers::desk()).await?;

        let linked = listing.keywords.iter().find(|k| k.name == "furniture");

        assert_eq!(linked.map(|k| k.uuid), Some(keyword.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn create_blank_keyword_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.keywords.create_keyword("   ".to_owned()).await;

        assert!(
            matches!(
                result,
                Err(KeywordsServiceError::Validation(
                    ValidationError::BlankKeyword { index: 0 }
                ))
            ),
            "expected BlankKeyword, got {result:?}"
        );
        assert_eq!(helpers::table_count(&ctx, "keywords").await, 0);
    }
}
