//! Listing wire types shared by the handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize};

use navi_app::domain::listings::{
    data::NewImage,
    records::{Inventory, ListingKind, SellStatus},
};

/// Sell status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StatusBody {
    Sell,
    SoldOut,
    OnSale,
}

impl From<StatusBody> for SellStatus {
    fn from(status: StatusBody) -> Self {
        match status {
            StatusBody::Sell => SellStatus::Sell,
            StatusBody::SoldOut => SellStatus::SoldOut,
            StatusBody::OnSale => SellStatus::OnSale,
        }
    }
}

impl From<SellStatus> for StatusBody {
    fn from(status: SellStatus) -> Self {
        match status {
            SellStatus::Sell => StatusBody::Sell,
            SellStatus::SoldOut => StatusBody::SoldOut,
            SellStatus::OnSale => StatusBody::OnSale,
        }
    }
}

/// Stock for sale listings, or the bookable period in days for rentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum InventoryBody {
    Sale { stock: u32 },
    Rental { min_days: u32, max_days: u32 },
}

impl From<InventoryBody> for Inventory {
    fn from(inventory: InventoryBody) -> Self {
        match inventory {
            InventoryBody::Sale { stock } => Inventory::Stock(stock),
            InventoryBody::Rental { min_days, max_days } => {
                Inventory::RentalPeriod { min_days, max_days }
            }
        }
    }
}

impl From<Inventory> for InventoryBody {
    fn from(inventory: Inventory) -> Self {
        match inventory {
            Inventory::Stock(stock) => InventoryBody::Sale { stock },
            Inventory::RentalPeriod { min_days, max_days } => {
                InventoryBody::Rental { min_days, max_days }
            }
        }
    }
}

/// Image to attach to a listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageBody {
    /// Uploaded filename or URL
    pub url: String,

    /// Alt text; defaults to the listing name
    #[serde(default)]
    pub alt: Option<String>,
}

impl From<ImageBody> for NewImage {
    fn from(image: ImageBody) -> Self {
        NewImage {
            url: image.url,
            alt: image.alt,
        }
    }
}

/// Deserialize a field where an explicit `null` differs from an absent one.
///
/// Pair with `#[serde(default)]`: absent fields stay `None` and `null`
/// becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse an optional `kind` query value.
pub(crate) fn parse_kind(value: Option<&str>) -> Result<Option<ListingKind>, String> {
    value
        .map(|kind| kind.parse::<ListingKind>().map_err(|e| e.to_string()))
        .transpose()
}

/// Parse an optional `status` query value.
pub(crate) fn parse_status(value: Option<&str>) -> Result<Option<SellStatus>, String> {
    value
        .map(|status| status.parse::<SellStatus>().map_err(|e| e.to_string()))
        .transpose()
}
