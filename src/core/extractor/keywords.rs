//! Keyword registry and category hints
//!
//! Both are plain data handed to the extractor at call time. The defaults are
//! compiled in from `assets/DefaultKeywords.toml`; a replacement file can be
//! configured through `paths.keywords_file`.

use crate::core::models::ModuleCategory;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_RULES: &str = include_str!("../../../assets/DefaultKeywords.toml");

/// Career slug to ordered, distinct, lower-cased substring keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordRegistry {
    careers: BTreeMap<String, Vec<String>>,
}

impl KeywordRegistry {
    /// Build a registry, lower-casing keywords and dropping blanks and repeats.
    /// Careers left without keywords are kept; the extractor skips them.
    #[must_use]
    pub fn new<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let careers = entries
            .into_iter()
            .map(|(career, keywords)| {
                let mut distinct: Vec<String> = Vec::new();
                for keyword in keywords {
                    let keyword = keyword.as_ref().trim().to_lowercase();
                    if !keyword.is_empty() && !distinct.contains(&keyword) {
                        distinct.push(keyword);
                    }
                }
                (career.into(), distinct)
            })
            .collect();
        Self { careers }
    }

    /// Keywords registered for a career
    #[must_use]
    pub fn keywords(&self, career_id: &str) -> Option<&[String]> {
        self.careers.get(career_id).map(Vec::as_slice)
    }

    /// Iterate careers in slug order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.careers
            .iter()
            .map(|(career, keywords)| (career.as_str(), keywords.as_slice()))
    }

    /// Number of careers in the registry
    #[must_use]
    pub fn len(&self) -> usize {
        self.careers.len()
    }

    /// Whether the registry has no careers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }
}

/// Ordered (hint, category) pairs; the first hint found in a module wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryHints {
    hints: Vec<(String, ModuleCategory)>,
}

impl CategoryHints {
    /// Build from ordered pairs; hints are lower-cased
    #[must_use]
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, ModuleCategory)>,
        S: AsRef<str>,
    {
        let hints = pairs
            .into_iter()
            .map(|(hint, category)| (hint.as_ref().trim().to_lowercase(), category))
            .filter(|(hint, _)| !hint.is_empty())
            .collect();
        Self { hints }
    }

    /// Hints in matching order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ModuleCategory)> {
        self.hints.iter().map(|(hint, cat)| (hint.as_str(), *cat))
    }
}

#[derive(Debug, Deserialize)]
struct RawHint {
    hint: String,
    category: ModuleCategory,
}

#[derive(Debug, Deserialize)]
struct RawRules {
    #[serde(default)]
    category_hints: Vec<RawHint>,
    #[serde(default)]
    careers: BTreeMap<String, Vec<String>>,
}

/// Everything the extractor needs besides the module text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRules {
    /// Career keyword sets
    pub registry: KeywordRegistry,
    /// Category assignment hints
    pub category_hints: CategoryHints,
}

impl ExtractionRules {
    /// Parse rules from TOML with `[[category_hints]]` and a `[careers]` table
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or names an unknown category
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let raw: RawRules = toml::from_str(toml_str)?;
        Ok(Self {
            registry: KeywordRegistry::new(raw.careers),
            category_hints: CategoryHints::new(
                raw.category_hints
                    .into_iter()
                    .map(|h| (h.hint, h.category)),
            ),
        })
    }

    /// Rules compiled into the binary
    ///
    /// # Panics
    /// Panics if the embedded asset is invalid, which is a build defect.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(DEFAULT_RULES).expect("Failed to parse compiled-in keyword registry")
    }

    /// Load rules from `path`, or the built-in rules when `path` is `None`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Ok(Self::from_toml(&content)?)
            }
            None => Ok(Self::builtin()),
        }
    }
}
