//! Catalog import and relevance extraction job
//!
//! Reads raw module and career records from JSON, cleans and normalizes them,
//! and writes modules, careers and module/career relevance edges into a store.
//! Re-running the job on the same input leaves the store unchanged.

use crate::core::error::{ImportError, StoreResult};
use crate::core::extractor::{clean_text, extract_relevance, resolve_category, ExtractionRules};
use crate::core::models::{CareerPath, Module, SalaryBand};
use crate::core::store::CatalogStore;
use crate::{debug, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Credits assumed when a record has none
pub const DEFAULT_CREDITS: u32 = 5;

/// Language assumed when a record has none
pub const DEFAULT_LANGUAGE: &str = "Deutsch";

/// A module record as produced by the handbook parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawModuleRecord {
    /// Module code, possibly truncated (e.g., "20-00-")
    #[serde(default, alias = "module_code")]
    pub code: String,
    /// German title
    #[serde(default, alias = "name")]
    pub name_de: String,
    /// English title
    #[serde(default)]
    pub name_en: String,
    /// Credit points; 0 means unknown
    #[serde(default)]
    pub credits: u32,
    /// Teaching language
    #[serde(default)]
    pub language: Option<String>,
    /// Offering frequency
    #[serde(default)]
    pub offering_frequency: String,
    /// Learning content
    #[serde(default)]
    pub learning_content: String,
    /// Learning objectives
    #[serde(default)]
    pub learning_objectives: String,
    /// Free-text category label
    #[serde(default)]
    pub category: Option<String>,
}

/// A career record from the career catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCareerRecord {
    /// Career slug
    pub id: String,
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
    /// Salary figures
    #[serde(default)]
    pub average_salary: SalaryBand,
    /// Skill labels
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl From<RawCareerRecord> for CareerPath {
    fn from(raw: RawCareerRecord) -> Self {
        Self {
            career_id: raw.id,
            title_en: raw.title_en,
            title_de: raw.title_de,
            description_en: raw.description_en,
            description_de: raw.description_de,
            salary: (!raw.average_salary.is_empty()).then_some(raw.average_salary),
            required_skills: raw.required_skills,
            is_active: true,
        }
    }
}

/// Counters reported at the end of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Modules written
    pub modules_imported: usize,
    /// Records dropped because their code was already seen
    pub duplicates_skipped: usize,
    /// Records dropped for an empty code or name
    pub invalid_skipped: usize,
    /// Careers written
    pub careers_imported: usize,
    /// Relevance edges written
    pub relevance_edges: usize,
    /// Stale edges removed because their score dropped to zero
    pub edges_removed: usize,
}

/// Input locations and switches for [`run_import`]
#[derive(Debug, Clone, Copy)]
pub struct ImportJob<'a> {
    /// Raw module records (JSON array)
    pub modules_file: &'a Path,
    /// Career catalog (JSON array); optional
    pub careers_file: Option<&'a Path>,
    /// Regulation attached to every imported module
    pub regulation: Option<&'a str>,
    /// Drop the existing catalog first
    pub clear: bool,
}

/// Complete a truncated module code: a trailing `-` gets `0000` appended
#[must_use]
pub fn normalize_module_code(code: &str) -> String {
    let code = code.trim();
    if code.ends_with('-') {
        format!("{code}0000")
    } else {
        code.to_string()
    }
}

/// Drop records without code or name and keep only the first record per code.
///
/// Returns the kept records in input order with their codes normalized, the
/// duplicate count and the invalid count.
#[must_use]
pub fn dedup_records(records: Vec<RawModuleRecord>) -> (Vec<RawModuleRecord>, usize, usize) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let (mut duplicates, mut invalid) = (0, 0);

    for mut record in records {
        record.code = normalize_module_code(&record.code);
        if record.code.is_empty() || record.name_de.trim().is_empty() {
            invalid += 1;
            continue;
        }
        if !seen.insert(record.code.clone()) {
            debug!("Skipping duplicate module record {}", record.code);
            duplicates += 1;
            continue;
        }
        kept.push(record);
    }
    (kept, duplicates, invalid)
}

/// Turn a raw record into a catalog module: text fields cleaned, category
/// resolved, missing credits and language defaulted
#[must_use]
pub fn build_module(
    record: RawModuleRecord,
    rules: &ExtractionRules,
    regulation: Option<&str>,
) -> Module {
    let name = clean_text(&record.name_de);
    let learning_content = clean_text(&record.learning_content);
    let category = resolve_category(
        &rules.category_hints,
        record.category.as_deref(),
        &name,
        &learning_content,
    );
    let language = record
        .language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    Module {
        code: record.code,
        name,
        name_en: clean_text(&record.name_en),
        credits: if record.credits == 0 {
            DEFAULT_CREDITS
        } else {
            record.credits
        },
        category,
        learning_content,
        learning_objectives: clean_text(&record.learning_objectives),
        language,
        offering_frequency: clean_text(&record.offering_frequency),
        regulation: regulation.map(str::to_string),
    }
}

/// Upsert career records by id
///
/// # Errors
/// Returns any storage failure unchanged
pub fn import_careers<S: CatalogStore>(
    store: &mut S,
    records: Vec<RawCareerRecord>,
) -> StoreResult<usize> {
    let mut count = 0;
    for record in records {
        if record.id.trim().is_empty() {
            warn!("Skipping career record without id");
            continue;
        }
        store.upsert_career(record.into())?;
        count += 1;
    }
    Ok(count)
}

/// Import module records and (re)compute their relevance edges.
///
/// Edges are upserted per (module, career); an edge for a registry career that
/// no longer scores above zero is removed.
///
/// # Errors
/// Returns any storage failure unchanged
pub fn import_modules<S: CatalogStore>(
    store: &mut S,
    records: Vec<RawModuleRecord>,
    rules: &ExtractionRules,
    regulation: Option<&str>,
) -> StoreResult<ImportSummary> {
    let (records, duplicates_skipped, invalid_skipped) = dedup_records(records);
    let mut modules: Vec<Module> = records
        .into_iter()
        .map(|r| build_module(r, rules, regulation))
        .collect();
    modules.sort_by(|a, b| a.code.cmp(&b.code));

    let mut summary = ImportSummary {
        duplicates_skipped,
        invalid_skipped,
        ..ImportSummary::default()
    };

    for module in modules {
        let edges = extract_relevance(&module, &rules.registry);
        let scored: HashSet<&str> = edges.iter().map(|e| e.career_id.as_str()).collect();
        for (career_id, _) in rules.registry.iter() {
            if !scored.contains(career_id) && store.remove_relevance(&module.code, career_id)? {
                summary.edges_removed += 1;
            }
        }
        summary.relevance_edges += edges.len();
        for edge in edges {
            store.upsert_relevance(edge)?;
        }
        store.upsert_module(module)?;
        summary.modules_imported += 1;
    }
    Ok(summary)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ImportError> {
    let content = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ImportError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Run a full import from files
///
/// # Errors
/// Returns an error if an input file cannot be read or parsed, or if the store
/// rejects a write
pub fn run_import<S: CatalogStore>(
    store: &mut S,
    job: &ImportJob<'_>,
    rules: &ExtractionRules,
) -> Result<ImportSummary, ImportError> {
    let modules: Vec<RawModuleRecord> = read_json(job.modules_file)?;
    let careers: Vec<RawCareerRecord> = match job.careers_file {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    if job.clear {
        info!("Clearing existing catalog");
        store.clear_catalog()?;
    }

    let careers_imported = import_careers(store, careers)?;
    let mut summary = import_modules(store, modules, rules, job.regulation)?;
    summary.careers_imported = careers_imported;

    info!(
        "Imported {} modules, {} careers, {} relevance edges",
        summary.modules_imported, summary.careers_imported, summary.relevance_edges
    );
    if summary.duplicates_skipped > 0 || summary.invalid_skipped > 0 {
        warn!(
            "Skipped {} duplicate and {} invalid module records",
            summary.duplicates_skipped, summary.invalid_skipped
        );
    }
    Ok(summary)
}
