//! Listings service.

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        keywords::{PgKeywordsRepository, records::KeywordUuid},
        listings::{
            data::{ListingUpdate, ListingsQuery, NewListing},
            errors::ListingsServiceError,
            records::{Listing, ListingRecord, ListingUuid, ListingsPage, UnknownVariant},
            repositories::{PgListingImagesRepository, PgListingsRepository},
            validation::normalise_keywords,
        },
    },
};

/// What deleting a listing does to its row.
///
/// Images and keyword links are removed either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Set `deleted_at`, keeping the row for audit.
    #[default]
    Soft,

    /// Remove the row.
    Hard,
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soft => f.write_str("soft"),
            Self::Hard => f.write_str("hard"),
        }
    }
}

impl FromStr for DeletePolicy {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "soft" => Ok(Self::Soft),
            "hard" => Ok(Self::Hard),
            other => Err(UnknownVariant::new("delete policy", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgListingsService {
    db: Db,
    delete_policy: DeletePolicy,
    listings_repository: PgListingsRepository,
    images_repository: PgListingImagesRepository,
    keywords_repository: PgKeywordsRepository,
}

impl PgListingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            delete_policy: DeletePolicy::default(),
            listings_repository: PgListingsRepository::new(),
            images_repository: PgListingImagesRepository::new(),
            keywords_repository: PgKeywordsRepository::new(),
        }
    }

    #[must_use]
    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    /// Attach images and keywords to listing records, preserving record order.
    async fn load_aggregates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: Vec<ListingRecord>,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let uuids: Vec<ListingUuid> = records.iter().map(|record| record.uuid).collect();

        let mut images = self.images_repository.list_images(tx, &uuids).await?;

        let mut keywords = self
            .keywords_repository
            .list_listing_keywords(tx, &uuids)
            .await?;

        Ok(records
            .into_iter()
            .map(|record| Listing {
                images: images.remove(&record.uuid).unwrap_or_default(),
                keywords: keywords.remove(&record.uuid).unwrap_or_default(),
                record,
            })
            .collect())
    }

    /// Read a live listing with its associations from one snapshot.
    async fn load_listing(&self, listing: ListingUuid) -> Result<Listing, ListingsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let record = self.listings_repository.get_listing(&mut tx, listing).await?;

        let loaded = self
            .load_aggregates(&mut tx, vec![record])
            .await?
            .pop()
            .ok_or(ListingsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(loaded)
    }

    /// Find or create every keyword and link them to the listing in the given order.
    async fn link_keywords(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        names: &[&str],
    ) -> Result<(), ListingsServiceError> {
        let resolved = self
            .keywords_repository
            .find_or_create_keywords(tx, names)
            .await?;

        let keyword_uuids = keyword_uuids_in_order(names, &resolved)?;

        self.keywords_repository
            .create_listing_keywords(tx, listing, &keyword_uuids)
            .await?;

        Ok(())
    }
}

/// Look up every name in `resolved`, keeping the order of `names`.
fn keyword_uuids_in_order(
    names: &[&str],
    resolved: &FxHashMap<String, KeywordUuid>,
) -> Result<SmallVec<[KeywordUuid; 5]>, ListingsServiceError> {
    names
        .iter()
        .map(|name| {
            resolved
                .get(*name)
                .copied()
                .ok_or_else(|| ListingsServiceError::KeywordUnresolved((*name).to_owned()))
        })
        .collect()
}

/// Copy the fields present in `update` onto `record`.
fn merge_update(mut record: ListingRecord, update: &ListingUpdate) -> ListingRecord {
    if let Some(name) = &update.name {
        name.trim().clone_into(&mut record.name);
    }

    if let Some(price) = update.price {
        record.price = price;
    }

    if let Some(inventory) = update.inventory {
        record.inventory = inventory;
    }

    if let Some(description) = &update.description {
        record.description.clone_from(description);
    }

    if let Some(status) = update.status {
        record.status = status;
    }

    record
}

#[async_trait]
impl ListingsService for PgListingsService {
    async fn list_listings(
        &self,
        listings_query: ListingsQuery,
    ) -> Result<ListingsPage, ListingsServiceError> {
        let listings_query = listings_query.normalised();

        let mut tx = self.db.begin_snapshot().await?;

        let total = self
            .listings_repository
            .count_listings(&mut tx, &listings_query)
            .await?;

        let records = self
            .listings_repository
            .list_listings(&mut tx, &listings_query)
            .await?;

        let listings = self.load_aggregates(&mut tx, records).await?;

        tx.commit().await?;

        Ok(ListingsPage {
            listings,
            total,
            page: listings_query.page,
            limit: listings_query.limit,
            total_pages: total.div_ceil(u64::from(listings_query.limit)),
        })
    }

    async fn get_listing(&self, listing: ListingUuid) -> Result<Listing, ListingsServiceError> {
        self.load_listing(listing).await
    }

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, ListingsServiceError> {
        listing.validate()?;

        let keywords = normalise_keywords(&listing.keywords)?;
        let uuid = ListingUuid::new();

        let mut tx = self.db.begin().await?;

        let created = self
            .listings_repository
            .create_listing(&mut tx, uuid, &listing)
            .await?;

        self.images_repository
            .create_images(&mut tx, uuid, &created.name, &listing.images)
            .await?;

        self.link_keywords(&mut tx, uuid, &keywords).await?;

        tx.commit().await?;

        info!(
            listing_uuid = %uuid,
            image_count = listing.images.len(),
            keyword_count = keywords.len(),
            "created listing"
        );

        self.load_listing(uuid).await
    }

    async fn update_listing(
        &self,
        listing: ListingUuid,
        update: ListingUpdate,
    ) -> Result<Listing, ListingsServiceError> {
        update.validate()?;

        let keywords = update
            .keywords
            .as_deref()
            .map(normalise_keywords)
            .transpose()?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .listings_repository
            .lock_listing(&mut tx, listing)
            .await?;

        update.check_kind(stored.inventory.kind())?;

        let updated = self
            .listings_repository
            .update_listing(&mut tx, &merge_update(stored, &update))
            .await?;

        if let Some(images) = &update.images {
            self.images_repository
                .delete_images(&mut tx, listing)
                .await?;

            self.images_repository
                .create_images(&mut tx, listing, &updated.name, images)
                .await?;
        }

        if let Some(keywords) = &keywords {
            self.keywords_repository
                .delete_listing_keywords(&mut tx, listing)
                .await?;

            self.link_keywords(&mut tx, listing, keywords).await?;
        }

        tx.commit().await?;

        info!(
            listing_uuid = %listing,
            images_replaced = update.images.is_some(),
            keywords_replaced = keywords.is_some(),
            "updated listing"
        );

        self.load_listing(listing).await
    }

    async fn delete_listing(&self, listing: ListingUuid) -> Result<(), ListingsServiceError> {
        let mut tx = self.db.begin().await?;

        self.listings_repository
            .lock_listing(&mut tx, listing)
            .await?;

        self.keywords_repository
            .delete_listing_keywords(&mut tx, listing)
            .await?;

        self.images_repository
            .delete_images(&mut tx, listing)
            .await?;

        let rows_affected = match self.delete_policy {
            DeletePolicy::Soft => {
                self.listings_repository
                    .soft_delete_listing(&mut tx, listing)
                    .await?
            }
            DeletePolicy::Hard => {
                self.listings_repository
                    .hard_delete_listing(&mut tx, listing)
                    .await?
            }
        };

        if rows_affected == 0 {
            return Err(ListingsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(listing_uuid = %listing, policy = %self.delete_policy, "deleted listing");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ListingsService: Send + Sync {
    /// Retrieve one page of live listings.
    async fn list_listings(
        &self,
        listings_query: ListingsQuery,
    ) -> Result<ListingsPage, ListingsServiceError>;

    /// Retrieve a single live listing with its images and keywords.
    async fn get_listing(&self, listing: ListingUuid) -> Result<Listing, ListingsServiceError>;

    /// Creates a listing with its images and keywords in one transaction.
    async fn create_listing(&self, listing: NewListing) -> Result<Listing, ListingsServiceError>;

    /// Applies a partial update in one transaction.
    async fn update_listing(
        &self,
        listing: ListingUuid,
        update: ListingUpdate,
    ) -> Result<Listing, ListingsServiceError>;

    /// Deletes a listing and its image and keyword associations.
    async fn delete_listing(&self, listing: ListingUuid) -> Result<(), ListingsServiceError>;
}
