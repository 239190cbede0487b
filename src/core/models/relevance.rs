//! Module-to-career relevance edge

use serde::{Deserialize, Serialize};

/// Scores at or above this value mark a module as core for a career
pub const CORE_THRESHOLD: u8 = 50;

/// Directed edge from a module to a career path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCareerRelevance {
    /// Module code
    pub module_code: String,
    /// Career slug
    pub career_id: String,
    /// Relevance in 0..=100
    pub relevance_score: u8,
    /// Core flag; derived from the score by the extractor, curated otherwise
    pub is_core: bool,
}

impl ModuleCareerRelevance {
    /// Create an edge with `is_core` derived from the score.
    /// Scores above 100 are clamped.
    #[must_use]
    pub fn derived(module_code: String, career_id: String, relevance_score: u8) -> Self {
        let relevance_score = relevance_score.min(100);
        Self {
            module_code,
            career_id,
            relevance_score,
            is_core: relevance_score >= CORE_THRESHOLD,
        }
    }

    /// The (module, career) pair identifying this edge
    #[must_use]
    pub fn key(&self) -> (String, String) {
        (self.module_code.clone(), self.career_id.clone())
    }
}
