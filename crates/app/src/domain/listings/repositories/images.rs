//! Listing Images Repository

use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::listings::{
    data::NewImage,
    records::{ImageRecord, ImageUuid, ListingUuid},
};

const CREATE_IMAGES_SQL: &str = include_str!("../sql/create_images.sql");
const DELETE_IMAGES_SQL: &str = include_str!("../sql/delete_images.sql");
const LIST_IMAGES_SQL: &str = include_str!("../sql/list_images.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgListingImagesRepository;

impl PgListingImagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert all images in one statement, positioned in slice order.
    ///
    /// Images without alt text (or with blank alt text) take `default_alt`.
    #[tracing::instrument(
        name = "listings.repository.create_images",
        skip(self, tx, default_alt, images),
        fields(listing_uuid = %listing, image_count = images.len()),
        err
    )]
    pub(crate) async fn create_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        default_alt: &str,
        images: &[NewImage],
    ) -> Result<(), sqlx::Error> {
        if images.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = images.iter().map(|_| Uuid::now_v7()).collect();
        let urls: Vec<&str> = images.iter().map(|image| image.url.trim()).collect();
        let alts: Vec<&str> = images
            .iter()
            .map(|image| {
                image
                    .alt
                    .as_deref()
                    .map(str::trim)
                    .filter(|alt| !alt.is_empty())
                    .unwrap_or(default_alt)
            })
            .collect();

        query(CREATE_IMAGES_SQL)
            .bind(listing.into_uuid())
            .bind(&uuids)
            .bind(&urls)
            .bind(&alts)
            .execute(&mut **tx)
            .await?;

        debug!(image_count = images.len(), "created images");

        Ok(())
    }

    #[tracing::instrument(
        name = "listings.repository.delete_images",
        skip(self, tx),
        fields(listing_uuid = %listing),
        err
    )]
    pub(crate) async fn delete_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_IMAGES_SQL)
            .bind(listing.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(rows_affected, "deleted images");

        Ok(rows_affected)
    }

    /// Images of every given listing, in display order.
    pub(crate) async fn list_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listings: &[ListingUuid],
    ) -> Result<FxHashMap<ListingUuid, Vec<ImageRecord>>, sqlx::Error> {
        let mut images: FxHashMap<ListingUuid, Vec<ImageRecord>> = FxHashMap::default();

        if listings.is_empty() {
            return Ok(images);
        }

        let listing_uuids: Vec<Uuid> = listings.iter().copied().map(Into::into).collect();

        let rows: Vec<(Uuid, Uuid, String, String)> = query_as(LIST_IMAGES_SQL)
            .bind(&listing_uuids)
            .fetch_all(&mut **tx)
            .await?;

        for (listing_uuid, uuid, url, alt) in rows {
            images
                .entry(ListingUuid::from_uuid(listing_uuid))
                .or_default()
                .push(ImageRecord {
                    uuid: ImageUuid::from_uuid(uuid),
                    url,
                    alt,
                });
        }

        Ok(images)
    }
}
