use serde::{Deserialize, Serialize};

use super::Extra;

/// Paginated listing envelope.
///
/// Meta fields default to 0 for listings that are not paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub last_page: u32,
    #[serde(flatten)]
    pub extra: Extra,
}

impl<T> Page<T> {
    pub fn meta(&self) -> PostMeta {
        PostMeta {
            total: self.total,
            current_page: self.current_page,
            last_page: self.last_page,
        }
    }
}

/// Single-resource envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Pagination state kept for the all-posts listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub total: u64,
    pub current_page: u32,
    pub last_page: u32,
}
