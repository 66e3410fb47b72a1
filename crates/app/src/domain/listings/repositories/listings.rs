//! Listings Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;

use crate::domain::listings::{
    data::{ListingsQuery, NewListing},
    records::{Inventory, ListingKind, ListingRecord, ListingUuid, SellStatus},
};

const LIST_LISTINGS_SQL: &str = include_str!("../sql/list_listings.sql");
const COUNT_LISTINGS_SQL: &str = include_str!("../sql/count_listings.sql");
const GET_LISTING_SQL: &str = include_str!("../sql/get_listing.sql");
const LOCK_LISTING_SQL: &str = include_str!("../sql/lock_listing.sql");
const CREATE_LISTING_SQL: &str = include_str!("../sql/create_listing.sql");
const UPDATE_LISTING_SQL: &str = include_str!("../sql/update_listing.sql");
const SOFT_DELETE_LISTING_SQL: &str = include_str!("../sql/soft_delete_listing.sql");
const HARD_DELETE_LISTING_SQL: &str = include_str!("../sql/hard_delete_listing.sql");

/// Column values for the inventory of a listing: stock, rental min, rental max.
type InventoryColumns = (Option<i64>, Option<i64>, Option<i64>);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgListingsRepository;

impl PgListingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "listings.repository.list_listings",
        skip(self, tx),
        fields(listing_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_listings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listings_query: &ListingsQuery,
    ) -> Result<Vec<ListingRecord>, sqlx::Error> {
        let pattern = listings_query.search.as_deref().map(like_pattern);
        let limit = i64::from(listings_query.limit);
        let offset = i64::try_from(listings_query.offset())
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let listings = query_as::<Postgres, ListingRecord>(LIST_LISTINGS_SQL)
            .bind(listings_query.status.map(SellStatus::as_str))
            .bind(listings_query.kind.map(ListingKind::as_str))
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("listing_count", listings.len());

        Ok(listings)
    }

    pub(crate) async fn count_listings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listings_query: &ListingsQuery,
    ) -> Result<u64, sqlx::Error> {
        let pattern = listings_query.search.as_deref().map(like_pattern);

        let total: i64 = query_scalar(COUNT_LISTINGS_SQL)
            .bind(listings_query.status.map(SellStatus::as_str))
            .bind(listings_query.kind.map(ListingKind::as_str))
            .bind(pattern)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| decode_error("count", e))
    }

    pub(crate) async fn get_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<ListingRecord, sqlx::Error> {
        query_as::<Postgres, ListingRecord>(GET_LISTING_SQL)
            .bind(listing.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a live listing and hold a row lock until the transaction ends.
    pub(crate) async fn lock_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<ListingRecord, sqlx::Error> {
        query_as::<Postgres, ListingRecord>(LOCK_LISTING_SQL)
            .bind(listing.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "listings.repository.create_listing",
        skip(self, tx, new_listing),
        fields(listing_uuid = %listing, kind = %new_listing.inventory.kind()),
        err
    )]
    pub(crate) async fn create_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        new_listing: &NewListing,
    ) -> Result<ListingRecord, sqlx::Error> {
        let price = price_column(new_listing.price)?;
        let (stock, rental_period_min, rental_period_max) =
            inventory_columns(new_listing.inventory);

        let created = query_as::<Postgres, ListingRecord>(CREATE_LISTING_SQL)
            .bind(listing.into_uuid())
            .bind(new_listing.inventory.kind().as_str())
            .bind(new_listing.name.trim())
            .bind(price)
            .bind(stock)
            .bind(rental_period_min)
            .bind(rental_period_max)
            .bind(new_listing.description.as_deref())
            .bind(new_listing.status.unwrap_or_default().as_str())
            .fetch_one(&mut **tx)
            .await?;

        debug!("created listing");

        Ok(created)
    }

    /// Write every mutable column of `listing`.
    ///
    /// Callers merge partial updates into the locked row before calling this.
    #[tracing::instrument(
        name = "listings.repository.update_listing",
        skip(self, tx, listing),
        fields(listing_uuid = %listing.uuid),
        err
    )]
    pub(crate) async fn update_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &ListingRecord,
    ) -> Result<ListingRecord, sqlx::Error> {
        let price = price_column(listing.price)?;
        let (stock, rental_period_min, rental_period_max) = inventory_columns(listing.inventory);

        let updated = query_as::<Postgres, ListingRecord>(UPDATE_LISTING_SQL)
            .bind(listing.uuid.into_uuid())
            .bind(&listing.name)
            .bind(price)
            .bind(stock)
            .bind(rental_period_min)
            .bind(rental_period_max)
            .bind(listing.description.as_deref())
            .bind(listing.status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        debug!("updated listing");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "listings.repository.soft_delete_listing",
        skip(self, tx),
        fields(listing_uuid = %listing),
        err
    )]
    pub(crate) async fn soft_delete_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_LISTING_SQL)
            .bind(listing.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "listings.repository.hard_delete_listing",
        skip(self, tx),
        fields(listing_uuid = %listing),
        err
    )]
    pub(crate) async fn hard_delete_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(HARD_DELETE_LISTING_SQL)
            .bind(listing.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// `ILIKE` pattern matching `search` anywhere, with wildcards in it escaped.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);

    pattern.push('%');

    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

fn price_column(price: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(price).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn inventory_columns(inventory: Inventory) -> InventoryColumns {
    match inventory {
        Inventory::Stock(stock) => (Some(i64::from(stock)), None, None),
        Inventory::RentalPeriod { min_days, max_days } => {
            (None, Some(i64::from(min_days)), Some(i64::from(max_days)))
        }
    }
}

fn try_get_u32(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i64 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| decode_error(column, e))
}

fn decode_error(column: &str, error: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for ListingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| decode_error("price", e))?;

        let kind = row
            .try_get::<&str, _>("kind")?
            .parse::<ListingKind>()
            .map_err(|e| decode_error("kind", e))?;

        let inventory = match kind {
            ListingKind::Sale => Inventory::Stock(try_get_u32(row, "stock")?),
            ListingKind::Rental => Inventory::RentalPeriod {
                min_days: try_get_u32(row, "rental_period_min")?,
                max_days: try_get_u32(row, "rental_period_max")?,
            },
        };

        let status = row
            .try_get::<&str, _>("status")?
            .parse::<SellStatus>()
            .map_err(|e| decode_error("status", e))?;

        Ok(Self {
            uuid: ListingUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price,
            inventory,
            description: row.try_get("description")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn inventory_columns_leave_other_kind_null() {
        assert_eq!(inventory_columns(Inventory::Stock(4)), (Some(4), None, None));
        assert_eq!(
            inventory_columns(Inventory::RentalPeriod {
                min_days: 2,
                max_days: 14
            }),
            (None, Some(2), Some(14))
        );
    }
}
