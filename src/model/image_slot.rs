use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};
use utoipa::ToSchema;

/// Image payloads embedded in the record as data URIs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageSlot {
    Logo,
    Signature,
    Stamp,
}

impl ImageSlot {
    pub fn index(self) -> usize {
        match self {
            ImageSlot::Logo => 0,
            ImageSlot::Signature => 1,
            ImageSlot::Stamp => 2,
        }
    }
}
