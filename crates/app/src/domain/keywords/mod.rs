//! Keywords

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::KeywordsServiceError;
pub(crate) use repository::PgKeywordsRepository;
pub use service::*;
