//! Request and response shapes of the REST API.
//!
//! Entities are pass-through: only the fields the client reads are typed and
//! every other field is kept in `extra`, so committing a value to state or
//! handing it to a caller loses nothing.

mod page;
mod post;
mod request;
mod user;

pub use page::{Envelope, Page, PostMeta};
pub use post::{Company, Id, Post, Tag};
pub use request::{LoginRequest, RegisterRequest, SearchParams, SubscribeRequest};
pub use user::{AuthResponse, User};

/// Fields the client does not interpret
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
