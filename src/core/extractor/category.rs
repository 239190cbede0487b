//! Category assignment from free-text hints

use super::keywords::CategoryHints;
use crate::core::models::ModuleCategory;

/// Assign a canonical category by searching the hints, in order, in the
/// lower-cased title and learning content. Falls back to restricted elective.
#[must_use]
pub fn assign_category(hints: &CategoryHints, name: &str, learning_content: &str) -> ModuleCategory {
    let name = name.to_lowercase();
    let content = learning_content.to_lowercase();
    hints
        .iter()
        .find(|(hint, _)| name.contains(hint) || content.contains(hint))
        .map_or(ModuleCategory::RestrictedElective, |(_, category)| category)
}

/// Resolve a raw category label: a canonical label is used as-is, anything else
/// goes through the hint search.
#[must_use]
pub fn resolve_category(
    hints: &CategoryHints,
    label: Option<&str>,
    name: &str,
    learning_content: &str,
) -> ModuleCategory {
    label
        .and_then(|l| l.parse::<ModuleCategory>().ok())
        .unwrap_or_else(|| assign_category(hints, name, learning_content))
}
