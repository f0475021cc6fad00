//! Reelhouse API Library
//!
//! HTTP surface of the ingestion service: routing, bearer authentication,
//! multipart intake, error rendering and application setup.

mod handlers;
mod utils;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
