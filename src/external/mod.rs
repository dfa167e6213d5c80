//! REST transport: the [`ApiBackend`] seam the actions talk to, and its
//! reqwest-based implementation.

mod backend;
pub mod client;
mod http;

pub use backend::ApiBackend;
pub use client::build_http_client;
pub use http::HttpApi;
