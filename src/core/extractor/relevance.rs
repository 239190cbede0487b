//! Keyword-based module/career relevance scoring

use super::keywords::KeywordRegistry;
use crate::core::models::{Module, ModuleCareerRelevance};
use std::collections::BTreeMap;

/// Relevance score per career slug. Careers scoring zero are absent.
pub type RelevanceByCareer = BTreeMap<String, u8>;

/// Share of matched keywords as a percentage, rounded half up and clamped to 100.
///
/// Returns `None` for an empty keyword set.
#[must_use]
pub fn keyword_percentage(matched: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let matched = matched.min(total);
    let percent = (200 * matched + total) / (2 * total);
    u8::try_from(percent.min(100)).ok()
}

/// Number of distinct keywords occurring as substrings of `text`
#[must_use]
pub fn count_matches(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count()
}

/// Score `text` against every career of the registry.
///
/// `text` is lower-cased before matching. Careers without keywords or without
/// a single match are omitted from the result.
#[must_use]
pub fn score_text(text: &str, registry: &KeywordRegistry) -> RelevanceByCareer {
    let text = text.to_lowercase();
    registry
        .iter()
        .filter_map(|(career, keywords)| {
            let score = keyword_percentage(count_matches(&text, keywords), keywords.len())?;
            (score > 0).then(|| (career.to_string(), score))
        })
        .collect()
}

/// Relevance edges for a module, scored over its title, learning content and
/// learning objectives. Only non-zero edges are produced.
#[must_use]
pub fn extract_relevance(module: &Module, registry: &KeywordRegistry) -> Vec<ModuleCareerRelevance> {
    score_text(&module.searchable_text(), registry)
        .into_iter()
        .map(|(career, score)| ModuleCareerRelevance::derived(module.code.clone(), career, score))
        .collect()
}
