//! Listing Repositories

mod images;
mod listings;

pub(crate) use images::PgListingImagesRepository;
pub(crate) use listings::PgListingsRepository;
