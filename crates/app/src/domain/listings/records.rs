//! Listing Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::keywords::records::KeywordRecord, uuids::TypedUuid};

/// Listing UUID
pub type ListingUuid = TypedUuid<ListingRecord>;

/// Image UUID
pub type ImageUuid = TypedUuid<ImageRecord>;

/// Unrecognised enum value read from storage or input.
#[derive(Debug, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Whether a listing is sold or rented out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Sale,
    Rental,
}

impl ListingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rental => "rental",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sale" => Ok(Self::Sale),
            "rental" => Ok(Self::Rental),
            other => Err(UnknownVariant::new("listing kind", other)),
        }
    }
}

/// Sell status of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SellStatus {
    #[default]
    Sell,
    SoldOut,
    OnSale,
}

impl SellStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sell => "sell",
            Self::SoldOut => "sold_out",
            Self::OnSale => "on_sale",
        }
    }
}

impl fmt::Display for SellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SellStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sell" => Ok(Self::Sell),
            "sold_out" => Ok(Self::SoldOut),
            "on_sale" => Ok(Self::OnSale),
            other => Err(UnknownVariant::new("sell status", other)),
        }
    }
}

/// Stock for sale listings, bookable period (in days) for rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inventory {
    Stock(u32),
    RentalPeriod { min_days: u32, max_days: u32 },
}

impl Inventory {
    #[must_use]
    pub const fn kind(self) -> ListingKind {
        match self {
            Self::Stock(_) => ListingKind::Sale,
            Self::RentalPeriod { .. } => ListingKind::Rental,
        }
    }
}

/// Listing Record
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub uuid: ListingUuid,
    pub name: String,
    pub price: u64,
    pub inventory: Inventory,
    pub description: Option<String>,
    pub status: SellStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Image Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub uuid: ImageUuid,
    pub url: String,
    pub alt: String,
}

/// Listing aggregate: the listing row with its images and keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub record: ListingRecord,
    pub images: Vec<ImageRecord>,
    pub keywords: Vec<KeywordRecord>,
}

impl Listing {
    #[must_use]
    pub fn uuid(&self) -> ListingUuid {
        self.record.uuid
    }

    /// Keyword names in association order.
    pub fn keyword_names(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|keyword| keyword.name.as_str())
    }
}

/// One page of listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingsPage {
    pub listings: Vec<Listing>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sell_status_round_trips_through_storage_names() {
        for status in [SellStatus::Sell, SellStatus::SoldOut, SellStatus::OnSale] {
            assert_eq!(status.as_str().parse::<SellStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn unknown_sell_status_is_rejected() {
        let result = "available".parse::<SellStatus>();

        assert!(result.is_err(), "expected error, got {result:?}");
    }

    #[test]
    fn inventory_kind_follows_variant() {
        assert_eq!(Inventory::Stock(3).kind(), ListingKind::Sale);
        assert_eq!(
            Inventory::RentalPeriod {
                min_days: 1,
                max_days: 7
            }
            .kind(),
            ListingKind::Rental
        );
    }
}
