//! Keyword Records

use crate::uuids::TypedUuid;

/// Keyword UUID
pub type KeywordUuid = TypedUuid<KeywordRecord>;

/// Keyword Record
///
/// Keywords are shared between listings and outlive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRecord {
    pub uuid: KeywordUuid,
    pub name: String,
}
