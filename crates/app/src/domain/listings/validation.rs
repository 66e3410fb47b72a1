//! Listing input validation.
//!
//! Runs before any transaction is opened.

use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::listings::{
    data::{ListingUpdate, NewImage, NewListing},
    records::{Inventory, ListingKind},
};

/// Longest accepted listing name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be blank")]
    BlankName,

    #[error("name must be at most {MAX_NAME_CHARS} characters")]
    NameTooLong,

    #[error("price must be greater than zero")]
    NonPositivePrice,

    #[error("price is too large")]
    PriceOutOfRange,

    #[error("rental period minimum ({min_days}) exceeds maximum ({max_days})")]
    InvalidRentalPeriod { min_days: u32, max_days: u32 },

    #[error("image {index} has a blank url")]
    BlankImageUrl { index: usize },

    #[error("keyword {index} is blank")]
    BlankKeyword { index: usize },

    #[error("{field} must not contain NUL characters")]
    NulCharacter { field: &'static str },

    #[error("cannot change a {stored} listing into a {requested} listing")]
    InventoryKindMismatch {
        stored: ListingKind,
        requested: ListingKind,
    },
}

impl NewListing {
    /// Check every field against the listing invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        validate_inventory(self.inventory)?;
        validate_description(self.description.as_deref())?;
        validate_images(&self.images)?;
        normalise_keywords(&self.keywords)?;

        Ok(())
    }
}

impl ListingUpdate {
    /// Check the fields present in the update.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        if let Some(price) = self.price {
            validate_price(price)?;
        }

        if let Some(inventory) = self.inventory {
            validate_inventory(inventory)?;
        }

        if let Some(description) = &self.description {
            validate_description(description.as_deref())?;
        }

        if let Some(images) = &self.images {
            validate_images(images)?;
        }

        if let Some(keywords) = &self.keywords {
            normalise_keywords(keywords)?;
        }

        Ok(())
    }

    /// Reject inventory changes that would switch a sale listing to a rental or back.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InventoryKindMismatch`] when kinds differ.
    pub fn check_kind(&self, stored: ListingKind) -> Result<(), ValidationError> {
        match self.inventory.map(Inventory::kind) {
            Some(requested) if requested != stored => {
                Err(ValidationError::InventoryKindMismatch { stored, requested })
            }
            Some(_) | None => Ok(()),
        }
    }
}

/// Trim keyword names and drop repeats, keeping the first occurrence.
///
/// # Errors
///
/// Returns [`ValidationError::BlankKeyword`] for names that are empty once trimmed.
pub fn normalise_keywords(keywords: &[String]) -> Result<SmallVec<[&str; 5]>, ValidationError> {
    let mut names: SmallVec<[&str; 5]> = SmallVec::with_capacity(keywords.len());

    for (index, keyword) in keywords.iter().enumerate() {
        let name = keyword.trim();

        if name.is_empty() {
            return Err(ValidationError::BlankKeyword { index });
        }

        reject_nul("keyword", name)?;

        if !names.contains(&name) {
            names.push(name);
        }
    }

    Ok(names)
}

/// PostgreSQL text columns cannot store `\0`.
fn reject_nul(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::NulCharacter { field });
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::BlankName);
    }

    reject_nul("name", name)?;

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong);
    }

    Ok(())
}

fn validate_price(price: u64) -> Result<(), ValidationError> {
    if price == 0 {
        return Err(ValidationError::NonPositivePrice);
    }

    if i64::try_from(price).is_err() {
        return Err(ValidationError::PriceOutOfRange);
    }

    Ok(())
}

fn validate_inventory(inventory: Inventory) -> Result<(), ValidationError> {
    match inventory {
        Inventory::RentalPeriod { min_days, max_days } if min_days > max_days => {
            Err(ValidationError::InvalidRentalPeriod { min_days, max_days })
        }
        Inventory::Stock(_) | Inventory::RentalPeriod { .. } => Ok(()),
    }
}

fn validate_description(description: Option<&str>) -> Result<(), ValidationError> {
    description.map_or(Ok(()), |description| reject_nul("description", description))
}

fn validate_images(images: &[NewImage]) -> Result<(), ValidationError> {
    for (index, image) in images.iter().enumerate() {
        if image.url.trim().is_empty() {
            return Err(ValidationError::BlankImageUrl { index });
        }

        reject_nul("image url", &image.url)?;

        if let Some(alt) = &image.alt {
            reject_nul("image alt", alt)?;
        }
    }

    Ok(())
}
