//! Kodilan client library
//!
//! Actions over the Kodilan job-board REST API, a client-side state store,
//! persistent session tokens and a command-line front end.

pub mod actions;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod storage;
pub mod store;

pub use actions::Actions;
pub use error::{AppError, AppResult};
