//! Keywords Repository

use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction, query, query_as};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{
    keywords::records::{KeywordRecord, KeywordUuid},
    listings::records::ListingUuid,
};

const INSERT_KEYWORDS_SQL: &str = include_str!("sql/insert_keywords.sql");
const FIND_KEYWORDS_BY_NAME_SQL: &str = include_str!("sql/find_keywords_by_name.sql");
const CREATE_LISTING_KEYWORDS_SQL: &str = include_str!("sql/create_listing_keywords.sql");
const DELETE_LISTING_KEYWORDS_SQL: &str = include_str!("sql/delete_listing_keywords.sql");
const LIST_LISTING_KEYWORDS_SQL: &str = include_str!("sql/list_listing_keywords.sql");
const LIST_KEYWORDS_SQL: &str = include_str!("sql/list_keywords.sql");

/// Lookups after a lost insert race are retried at most this many times.
const FIND_OR_CREATE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgKeywordsRepository;

impl PgKeywordsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Find or create a keyword for every name.
    ///
    /// Names that another transaction inserts concurrently are skipped by the
    /// insert and picked up by the following lookup. Under READ COMMITTED the
    /// insert waits for the competing transaction, so the lookup sees its row
    /// on the first attempt; the attempt bound only stops a loop if that ever
    /// fails to hold. Names still missing after the last attempt are left out
    /// of the returned map.
    #[tracing::instrument(
        name = "keywords.repository.find_or_create_keywords",
        skip(self, tx, names),
        fields(
            names_count = tracing::field::Empty,
            resolved_count = tracing::field::Empty,
            attempts = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn find_or_create_keywords(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        names: &[&str],
    ) -> Result<FxHashMap<String, KeywordUuid>, sqlx::Error> {
        tracing::Span::current().record("names_count", names.len());

        let mut resolved: FxHashMap<String, KeywordUuid> = FxHashMap::default();

        if names.is_empty() {
            return Ok(resolved);
        }

        // Sorted so concurrent inserts of overlapping sets take row locks in the same order.
        let mut pending: Vec<String> = names.iter().map(|name| (*name).to_owned()).collect();

        pending.sort_unstable();
        pending.dedup();

        let mut attempts = 0;

        while !pending.is_empty() && attempts < FIND_OR_CREATE_ATTEMPTS {
            attempts += 1;

            let new_uuids: Vec<Uuid> = pending.iter().map(|_| Uuid::now_v7()).collect();

            query(INSERT_KEYWORDS_SQL)
                .bind(&new_uuids)
                .bind(&pending)
                .execute(&mut **tx)
                .await?;

            let rows: Vec<(Uuid, String)> = query_as(FIND_KEYWORDS_BY_NAME_SQL)
                .bind(&pending)
                .fetch_all(&mut **tx)
                .await?;

            for (uuid, name) in rows {
                resolved.insert(name, KeywordUuid::from_uuid(uuid));
            }

            pending.retain(|name| !resolved.contains_key(name));

            if !pending.is_empty() {
                warn!(
                    attempt = attempts,
                    pending_count = pending.len(),
                    "keywords not visible after insert, retrying lookup"
                );
            }
        }

        let span = tracing::Span::current();

        span.record("resolved_count", resolved.len());
        span.record("attempts", attempts);

        debug!(resolved_count = resolved.len(), attempts, "resolved keywords");

        Ok(resolved)
    }

    #[tracing::instrument(
        name = "keywords.repository.create_listing_keywords",
        skip(self, tx, keywords),
        fields(listing_uuid = %listing, keyword_count = keywords.len()),
        err
    )]
    pub(crate) async fn create_listing_keywords(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        keywords: &[KeywordUuid],
    ) -> Result<(), sqlx::Error> {
        if keywords.is_empty() {
            return Ok(());
        }

        let keyword_uuids: Vec<Uuid> = keywords.iter().copied().map(Into::into).collect();

        query(CREATE_LISTING_KEYWORDS_SQL)
            .bind(listing.into_uuid())
            .bind(&keyword_uuids)
            .execute(&mut **tx)
            .await?;

        debug!(keyword_count = keywords.len(), "linked keywords");

        Ok(())
    }

    #[tracing::instrument(
        name = "keywords.repository.delete_listing_keywords",
        skip(self, tx),
        fields(listing_uuid = %listing),
        err
    )]
    pub(crate) async fn delete_listing_keywords(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LISTING_KEYWORDS_SQL)
            .bind(listing.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(rows_affected, "unlinked keywords");

        Ok(rows_affected)
    }

    /// Keywords of every given listing, in the order they were supplied.
    pub(crate) async fn list_listing_keywords(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listings: &[ListingUuid],
    ) -> Result<FxHashMap<ListingUuid, Vec<KeywordRecord>>, sqlx::Error> {
        let mut keywords: FxHashMap<ListingUuid, Vec<KeywordRecord>> = FxHashMap::default();

        if listings.is_empty() {
            return Ok(keywords);
        }

        let listing_uuids: Vec<Uuid> = listings.iter().copied().map(Into::into).collect();

        let rows: Vec<(Uuid, Uuid, String)> = query_as(LIST_LISTING_KEYWORDS_SQL)
            .bind(&listing_uuids)
            .fetch_all(&mut **tx)
            .await?;

        for (listing_uuid, uuid, name) in rows {
            keywords
                .entry(ListingUuid::from_uuid(listing_uuid))
                .or_default()
                .push(KeywordRecord {
                    uuid: KeywordUuid::from_uuid(uuid),
                    name,
                });
        }

        Ok(keywords)
    }

    /// Every keyword in the catalog, sorted by name.
    #[tracing::instrument(
        name = "keywords.repository.list_keywords",
        skip(self, tx),
        fields(keyword_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_keywords(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<KeywordRecord>, sqlx::Error> {
        let rows: Vec<(Uuid, String)> = query_as(LIST_KEYWORDS_SQL).fetch_all(&mut **tx).await?;

        tracing::Span::current().record("keyword_count", rows.len());

        Ok(rows
            .into_iter()
            .map(|(uuid, name)| KeywordRecord {
                uuid: KeywordUuid::from_uuid(uuid),
                name,
            })
            .collect())
    }
}
