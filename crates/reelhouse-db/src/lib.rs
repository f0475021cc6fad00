//! Reelhouse Database Library
//!
//! Persistence for video records behind the [`VideoStore`] trait, with a
//! Postgres repository for deployments and an in-memory store for development
//! and tests.

pub mod db;

pub use db::{InMemoryVideoStore, PgVideoRepository, VideoStore};
