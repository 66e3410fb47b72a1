//! Test Helpers

use sqlx::{query, query_scalar};

use crate::{
    domain::listings::{
        data::NewListing,
        records::{Inventory, ListingUuid, SellStatus},
    },
    test::TestContext,
};

/// A one-off sale listing with two keywords and no images.
pub(crate) fn desk() -> NewListing {
    NewListing {
        name: "Desk".to_owned(),
        price: 50_000,
        inventory: Inventory::Stock(1),
        description: None,
        status: Some(SellStatus::Sell),
        keywords: vec!["furniture".to_owned(), "home".to_owned()],
        images: vec![],
    }
}

/// Row count of a fixed table name, including soft-deleted listings.
pub(crate) async fn table_count(ctx: &TestContext, table: &'static str) -> i64 {
    query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count rows")
}

pub(crate) async fn image_count(ctx: &TestContext, listing: ListingUuid) -> i64 {
    query_scalar("SELECT COUNT(*) FROM listing_images WHERE listing_uuid = $1")
        .bind(listing.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count images")
}

pub(crate) async fn listing_keyword_count(ctx: &TestContext, listing: ListingUuid) -> i64 {
    query_scalar("SELECT COUNT(*) FROM listing_keywords WHERE listing_uuid = $1")
        .bind(listing.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count listing keywords")
}

pub(crate) async fn keyword_rows_named(ctx: &TestContext, name: &str) -> i64 {
    query_scalar("SELECT COUNT(*) FROM keywords WHERE name = $1")
        .bind(name)
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count keywords")
}

/// Number of listings linked to the keyword called `name`.
pub(crate) async fn keyword_link_count(ctx: &TestContext, name: &str) -> i64 {
    query_scalar(
        "SELECT COUNT(*) FROM listing_keywords lk \
         JOIN keywords k ON k.uuid = lk.keyword_uuid \
         WHERE k.name = $1",
    )
    .bind(name)
    .fetch_one(ctx.db.pool())
    .await
    .expect("Failed to count keyword links")
}

pub(crate) async fn soft_deleted_count(ctx: &TestContext, listing: ListingUuid) -> i64 {
    query_scalar("SELECT COUNT(*) FROM listings WHERE uuid = $1 AND deleted_at IS NOT NULL")
        .bind(listing.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count soft-deleted listings")
}

/// Make every image insert with the given url fail inside the database.
pub(crate) async fn reject_image_url(ctx: &TestContext, url: &str) {
    query(&format!(
        "CREATE FUNCTION reject_image_url() RETURNS trigger AS $$ \
         BEGIN \
           IF NEW.url = '{}' THEN RAISE EXCEPTION 'image url rejected'; END IF; \
           RETURN NEW; \
         END; \
         $$ LANGUAGE plpgsql",
        url.replace('\'', "''")
    ))
    .execute(ctx.db.pool())
    .await
    .expect("Failed to create reject trigger function");

    query(
        "CREATE TRIGGER reject_image_url BEFORE INSERT ON listing_images \
         FOR EACH ROW EXECUTE FUNCTION reject_image_url()",
    )
    .execute(ctx.db.pool())
    .await
    .expect("Failed to create reject trigger");
}
