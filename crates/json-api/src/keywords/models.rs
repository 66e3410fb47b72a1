//! Keyword wire types.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navi_app::domain::keywords::records::KeywordRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct KeywordResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<KeywordRecord> for KeywordResponse {
    fn from(keyword: KeywordRecord) -> Self {
        KeywordResponse {
            uuid: keyword.uuid.into(),
            name: keyword.name,
        }
    }
}
