//! Navi Domain Concerns

pub mod keywords;
pub mod listings;
