//! Listings Data

use crate::domain::listings::records::{Inventory, ListingKind, SellStatus};

/// Default page size for listing queries.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page size a listing query may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// New Image Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Uploaded filename or URL.
    pub url: String,

    /// Alt text; the listing name is used when absent.
    pub alt: Option<String>,
}

/// New Listing Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub price: u64,
    pub inventory: Inventory,
    pub description: Option<String>,
    pub status: Option<SellStatus>,
    pub keywords: Vec<String>,
    pub images: Vec<NewImage>,
}

/// Listing Update Data
///
/// Only fields that are `Some` are written. `description: Some(None)` clears
/// the description. `images` and `keywords` replace the whole association set
/// when present, even when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub inventory: Option<Inventory>,
    pub description: Option<Option<String>>,
    pub status: Option<SellStatus>,
    pub keywords: Option<Vec<String>>,
    pub images: Option<Vec<NewImage>>,
}

/// Listings Query Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingsQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub status: Option<SellStatus>,
    pub kind: Option<ListingKind>,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
}

impl Default for ListingsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            status: None,
            kind: None,
            search: None,
        }
    }
}

impl ListingsQuery {
    /// Page and limit clamped into their valid ranges.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
            search: self
                .search
                .map(|search| search.trim().to_owned())
                .filter(|search| !search.is_empty()),
            ..self
        }
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}
