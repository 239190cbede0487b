//! Career path model

use serde::{Deserialize, Serialize};

/// Three-point salary band; each point is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// Junior salary
    #[serde(default)]
    pub junior: Option<u32>,
    /// Mid-level salary
    #[serde(default)]
    pub mid: Option<u32>,
    /// Senior salary
    #[serde(default)]
    pub senior: Option<u32>,
}

impl SalaryBand {
    /// Whether none of the points are set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.junior.is_none() && self.mid.is_none() && self.senior.is_none()
    }
}

/// A career path students can declare interest in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPath {
    /// Stable slug (e.g., "`software_engineer`")
    pub career_id: String,

    /// English title
    #[serde(default)]
    pub title_en: String,

    /// German title
    #[serde(default)]
    pub title_de: String,

    /// English description
    #[serde(default)]
    pub description_en: String,

    /// German description
    #[serde(default)]
    pub description_de: String,

    /// Optional salary band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryBand>,

    /// Free-text skill labels
    #[serde(default)]
    pub required_skills: Vec<String>,

    /// Inactive careers are ignored by the recommender
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl CareerPath {
    /// Create a new active career path
    ///
    /// # Arguments
    /// * `career_id` - Stable slug
    /// * `title_en` - English title
    #[must_use]
    pub const fn new(career_id: String, title_en: String) -> Self {
        Self {
            career_id,
            title_en,
            title_de: String::new(),
            description_en: String::new(),
            description_de: String::new(),
            salary: None,
            required_skills: Vec::new(),
            is_active: true,
        }
    }

    /// Display title: English when present, German otherwise, the slug as last resort
    #[must_use]
    pub fn title(&self) -> &str {
        if !self.title_en.is_empty() {
            &self.title_en
        } else if !self.title_de.is_empty() {
            &self.title_de
        } else {
            &self.career_id
        }
    }
}
