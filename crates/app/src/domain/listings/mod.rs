//! Listings

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod validation;

pub use errors::ListingsServiceError;
pub use service::*;
