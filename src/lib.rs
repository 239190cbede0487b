//! Shared library for `studypath`
//! Career-relevance module recommendations for computer science students

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
