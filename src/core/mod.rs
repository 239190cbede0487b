//! Core module: domain models, relevance extraction, stores and the recommender

pub mod config;
pub mod error;
pub mod extractor;
pub mod importer;
pub mod interests;
pub mod models;
pub mod progress;
pub mod recommender;
pub mod store;

/// Returns the current version of the `studypath` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
