//! Relevance extraction: text cleanup, category assignment and keyword scoring

pub mod category;
pub mod cleanup;
pub mod keywords;
pub mod relevance;

pub use category::{assign_category, resolve_category};
pub use cleanup::clean_text;
pub use keywords::{CategoryHints, ExtractionRules, KeywordRegistry};
pub use relevance::{extract_relevance, keyword_percentage, score_text, RelevanceByCareer};
