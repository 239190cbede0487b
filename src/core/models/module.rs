//! Module model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical module categories of an examination regulation
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModuleCategory {
    /// Mandatory core modules (Pflichtbereich)
    MandatoryCore,
    /// Restricted electives (Wahlpflichtbereich)
    #[default]
    RestrictedElective,
    /// Free computer science electives (Informatik-Wahlbereich)
    FreeElective,
    /// Seminars, labs and other accompanying coursework (Studienbegleitende Leistungen)
    AccompanyingCoursework,
    /// General studies (Studium Generale)
    GeneralStudies,
    /// Thesis area (Abschlussbereich)
    ThesisArea,
}

impl ModuleCategory {
    /// All categories in catalog order
    pub const ALL: [Self; 6] = [
        Self::MandatoryCore,
        Self::RestrictedElective,
        Self::FreeElective,
        Self::AccompanyingCoursework,
        Self::GeneralStudies,
        Self::ThesisArea,
    ];

    /// Snake-case identifier used in serialized data and config files
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MandatoryCore => "mandatory_core",
            Self::RestrictedElective => "restricted_elective",
            Self::FreeElective => "free_elective",
            Self::AccompanyingCoursework => "accompanying_coursework",
            Self::GeneralStudies => "general_studies",
            Self::ThesisArea => "thesis_area",
        }
    }

    /// German label as printed in the module handbook
    #[must_use]
    pub const fn label_de(self) -> &'static str {
        match self {
            Self::MandatoryCore => "Pflichtbereich",
            Self::RestrictedElective => "Wahlpflichtbereich",
            Self::FreeElective => "Informatik-Wahlbereich",
            Self::AccompanyingCoursework => "Studienbegleitende Leistungen",
            Self::GeneralStudies => "Studium Generale",
            Self::ThesisArea => "Abschlussbereich",
        }
    }

    /// Whether modules of this category may be suggested without personalization
    #[must_use]
    pub const fn is_specialization(self) -> bool {
        matches!(self, Self::RestrictedElective | Self::FreeElective)
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_de())
    }
}

impl FromStr for ModuleCategory {
    type Err = String;

    /// Accepts either the snake-case key or the German handbook label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(trimmed) || c.label_de() == trimmed)
            .ok_or_else(|| format!("Unknown module category: '{s}'"))
    }
}

/// A module from the catalog of an examination regulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module code (e.g., "20-00-0004")
    pub code: String,

    /// Module title in the authoring language
    pub name: String,

    /// Optional English title
    #[serde(default)]
    pub name_en: String,

    /// Credit points (always positive)
    pub credits: u32,

    /// Canonical category
    #[serde(default)]
    pub category: ModuleCategory,

    /// Free-text learning content
    #[serde(default)]
    pub learning_content: String,

    /// Free-text learning objectives
    #[serde(default)]
    pub learning_objectives: String,

    /// Teaching language (e.g., "Deutsch")
    #[serde(default)]
    pub language: String,

    /// Offering frequency (e.g., "Jedes Wintersemester")
    #[serde(default)]
    pub offering_frequency: String,

    /// Examination regulation this module belongs to, if any
    #[serde(default)]
    pub regulation: Option<String>,
}

impl Module {
    /// Create a new module with empty free-text fields
    ///
    /// # Arguments
    /// * `code` - Module code
    /// * `name` - Module title
    /// * `credits` - Credit points
    /// * `category` - Canonical category
    #[must_use]
    pub const fn new(code: String, name: String, credits: u32, category: ModuleCategory) -> Self {
        Self {
            code,
            name,
            name_en: String::new(),
            credits,
            category,
            learning_content: String::new(),
            learning_objectives: String::new(),
            language: String::new(),
            offering_frequency: String::new(),
            regulation: None,
        }
    }

    /// Lower-cased title, learning content and learning objectives joined by spaces.
    /// This is the text the relevance extractor scans.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        [
            self.name.as_str(),
            self.learning_content.as_str(),
            self.learning_objectives.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Whether the module belongs to the given regulation (`None` matches every module)
    #[must_use]
    pub fn in_regulation(&self, regulation: Option<&str>) -> bool {
        regulation.is_none_or(|r| self.regulation.as_deref() == Some(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_creation() {
        let module = Module::new(
            "20-00-0004".to_string(),
            "Funktionale und objektorientierte Programmierkonzepte".to_string(),
            10,
            ModuleCategory::MandatoryCore,
        );

        assert_eq!(module.code, "20-00-0004");
        assert_eq!(module.credits, 10);
        assert!(module.learning_content.is_empty());
        assert!(module.regulation.is_none());
    }

    #[test]
    fn test_searchable_text_is_lowercase() {
        let mut module = Module::new(
            "20-00-0015".to_string(),
            "Datenbanksysteme".to_string(),
            5,
            ModuleCategory::RestrictedElective,
        );
        module.learning_content = "SQL und Transaktionen".to_string();
        module.learning_objectives = "Schema-Entwurf".to_string();

        assert_eq!(
            module.searchable_text(),
            "datenbanksysteme sql und transaktionen schema-entwurf"
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Wahlpflichtbereich".parse::<ModuleCategory>(),
            Ok(ModuleCategory::RestrictedElective)
        );
        assert_eq!(
            "thesis_area".parse::<ModuleCategory>(),
            Ok(ModuleCategory::ThesisArea)
        );
        assert!("Nebenfach".parse::<ModuleCategory>().is_err());
    }

    #[test]
    fn test_in_regulation() {
        let mut module = Module::new(
            "20-00-0001".to_string(),
            "Mathe".to_string(),
            9,
            ModuleCategory::MandatoryCore,
        );
        assert!(module.in_regulation(None));
        assert!(!module.in_regulation(Some("B.Sc. Informatik 2022")));

        module.regulation = Some("B.Sc. Informatik 2022".to_string());
        assert!(module.in_regulation(Some("B.Sc. Informatik 2022")));
    }

    #[test]
    fn test_specialization_categories() {
        assert!(ModuleCategory::RestrictedElective.is_specialization());
        assert!(ModuleCategory::FreeElective.is_specialization());
        assert!(!ModuleCategory::MandatoryCore.is_specialization());
    }
}
