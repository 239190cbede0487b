//! Career-relevance recommendation engine
//!
//! Scores every module a student has not yet started against the student's
//! career interests:
//!
//! ```text
//! total_score(m) = Σ relevance_score(m, c) * interest_level(c) / 100
//! ```
//!
//! summed over the careers `c` the student is interested in. Modules scoring
//! zero are dropped, the rest are ranked by score (ties by module code) and
//! cut to the limit. Students without interests get a shuffled selection of
//! electives instead.

pub mod fallback;
pub mod limit;

pub use fallback::{select_fallback, FALLBACK_REASON};
pub use limit::Limit;

use crate::core::error::RecommendError;
use crate::core::models::{CareerPath, Module, ModuleCareerRelevance, ModuleCategory};
use crate::core::progress::completed_totals;
use crate::core::store::{CatalogStore, CompletionTracker, InterestStore, UserDirectory};
use crate::debug;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Tuning knobs for a recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Maximum number of recommendations
    pub limit: Limit,
    /// Career titles named in the explanation
    pub reason_careers: usize,
    /// Characters of learning objectives kept in the preview
    pub objectives_preview_chars: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: Limit::DEFAULT,
            reason_careers: 3,
            objectives_preview_chars: 300,
        }
    }
}

/// A career that contributed to a module's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerMatch {
    /// Career slug
    pub career_id: String,
    /// Display title
    pub career_title: String,
    /// Raw module relevance for this career
    pub relevance_score: u8,
}

/// One recommended module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Module code
    pub module_code: String,
    /// Title in the authoring language
    pub name: String,
    /// English title
    pub name_en: String,
    /// Credit points
    pub credits: u32,
    /// Canonical category
    pub category: ModuleCategory,
    /// Teaching language
    pub language: String,
    /// Total score rounded half up. Personalized picks score at least 1;
    /// 0 marks an unpersonalized pick.
    pub relevance_score: u32,
    /// Contributing careers, strongest first
    pub matching_careers: Vec<CareerMatch>,
    /// Human readable explanation
    pub recommendation_reason: String,
    /// Learning objectives preview
    pub learning_objectives: String,
    /// Unrounded weighted score
    #[serde(skip)]
    pub total_score: f64,
    /// Weighted score in hundredths of a point, used for ranking
    #[serde(skip)]
    pub score_hundredths: u32,
}

/// A career interest as reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestSummary {
    /// Career slug
    pub career_id: String,
    /// Display title
    pub title: String,
    /// Interest level in 0..=100
    pub interest_level: u8,
    /// Primary flag
    pub is_primary: bool,
}

/// Progress figures returned alongside recommendations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    /// Modules with status completed
    pub completed_modules: usize,
    /// Credits of those modules
    pub completed_credits: u32,
    /// Whether personalized scoring was used
    pub career_interests_set: bool,
    /// All interests of the user
    pub career_interests: Vec<InterestSummary>,
}

/// Full answer to a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    /// Ranked modules
    pub recommendations: Vec<Recommendation>,
    /// Progress figures
    pub user_stats: UserStats,
    /// Summary line for display
    pub message: String,
}

/// Cut `text` to at most `max_chars` characters, appending `...` when shortened
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Explanation naming the strongest `count` career matches
#[must_use]
pub fn reason_for(matches: &[CareerMatch], count: usize) -> String {
    let titles: Vec<&str> = matches
        .iter()
        .take(count)
        .map(|m| m.career_title.as_str())
        .collect();
    format!("Relevant for: {}", titles.join(", "))
}

/// Weighted score of one module in hundredths of a point:
/// Σ relevance * interest over its edges.
/// Edges to careers without an interest contribute nothing.
#[must_use]
pub fn weighted_score(edges: &[&ModuleCareerRelevance], interest_levels: &HashMap<&str, u8>) -> u32 {
    edges
        .iter()
        .filter_map(|edge| {
            interest_levels
                .get(edge.career_id.as_str())
                .map(|&level| u32::from(edge.relevance_score) * u32::from(level))
        })
        .sum()
}

/// Round hundredths half up to whole points, keeping any non-zero score above 0
#[must_use]
pub const fn rounded_score(hundredths: u32) -> u32 {
    if hundredths == 0 {
        return 0;
    }
    let points = (hundredths + 50) / 100;
    if points == 0 {
        1
    } else {
        points
    }
}

/// Order by score descending, then module code ascending
fn by_rank(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.score_hundredths
        .cmp(&a.score_hundredths)
        .then_with(|| a.module_code.cmp(&b.module_code))
}

fn to_recommendation(
    module: &Module,
    score_hundredths: u32,
    matching_careers: Vec<CareerMatch>,
    recommendation_reason: String,
    options: &RecommendOptions,
) -> Recommendation {
    Recommendation {
        module_code: module.code.clone(),
        name: module.name.clone(),
        name_en: module.name_en.clone(),
        credits: module.credits,
        category: module.category,
        language: module.language.clone(),
        relevance_score: rounded_score(score_hundredths),
        matching_careers,
        recommendation_reason,
        learning_objectives: preview(&module.learning_objectives, options.objectives_preview_chars),
        total_score: f64::from(score_hundredths) / 100.0,
        score_hundredths,
    }
}

/// Rank candidate modules against interests.
///
/// `careers` maps the slugs in `interest_levels` to their career paths.
#[must_use]
pub fn rank_modules(
    candidates: &[Module],
    edges: &[ModuleCareerRelevance],
    interest_levels: &HashMap<&str, u8>,
    careers: &HashMap<String, CareerPath>,
    options: &RecommendOptions,
) -> Vec<Recommendation> {
    let mut edges_by_module: HashMap<&str, Vec<&ModuleCareerRelevance>> = HashMap::new();
    for edge in edges
        .iter()
        .filter(|e| interest_levels.contains_key(e.career_id.as_str()))
    {
        edges_by_module
            .entry(edge.module_code.as_str())
            .or_default()
            .push(edge);
    }

    let mut ranked: Vec<Recommendation> = candidates
        .iter()
        .filter_map(|module| {
            let module_edges = edges_by_module.get(module.code.as_str())?;
            let score_hundredths = weighted_score(module_edges, interest_levels);
            if score_hundredths == 0 {
                return None;
            }

            let mut matches: Vec<CareerMatch> = module_edges
                .iter()
                .map(|edge| CareerMatch {
                    career_id: edge.career_id.clone(),
                    career_title: careers
                        .get(&edge.career_id)
                        .map_or_else(|| edge.career_id.clone(), |c| c.title().to_string()),
                    relevance_score: edge.relevance_score,
                })
                .collect();
            matches.sort_by(|a, b| {
                b.relevance_score
                    .cmp(&a.relevance_score)
                    .then_with(|| a.career_id.cmp(&b.career_id))
            });
            let reason = reason_for(&matches, options.reason_careers);

            Some(to_recommendation(module, score_hundredths, matches, reason, options))
        })
        .collect();

    ranked.sort_by(by_rank);
    ranked.truncate(options.limit.get());
    ranked
}

/// Produce recommendations for `user_id`.
///
/// `rng` only drives the fallback shuffle; personalized rankings are fully
/// deterministic.
///
/// # Errors
/// Returns `RecommendError::UnknownUser` for an unregistered user and passes
/// store failures through unchanged.
pub fn recommend<S, R>(
    store: &S,
    user_id: &str,
    options: &RecommendOptions,
    rng: &mut R,
) -> Result<RecommendationResponse, RecommendError>
where
    S: CatalogStore + InterestStore + CompletionTracker + UserDirectory,
    R: Rng + ?Sized,
{
    let user = store
        .user(user_id)?
        .ok_or_else(|| RecommendError::UnknownUser(user_id.to_string()))?;

    let taken: HashSet<String> = store
        .completions(user_id)?
        .into_iter()
        .filter(|c| c.status.excludes_from_candidates())
        .map(|c| c.module_code)
        .collect();
    let candidates: Vec<Module> = store
        .candidate_modules(user.regulation.as_deref())?
        .into_iter()
        .filter(|m| !taken.contains(&m.code))
        .collect();
    debug!(
        "{user_id}: {} candidate modules ({} taken)",
        candidates.len(),
        taken.len()
    );

    let interests = store.interests(user_id)?;
    let mut careers: HashMap<String, CareerPath> = HashMap::new();
    for interest in &interests {
        if let Some(career) = store.career(&interest.career_id)? {
            careers.insert(career.career_id.clone(), career);
        }
    }
    let interest_levels: HashMap<&str, u8> = interests
        .iter()
        .filter(|i| careers.get(&i.career_id).is_some_and(|c| c.is_active))
        .map(|i| (i.career_id.as_str(), i.interest_level))
        .collect();

    let (completed_modules, completed_credits) = completed_totals(store, user_id)?;
    let user_stats = UserStats {
        completed_modules,
        completed_credits,
        career_interests_set: !interest_levels.is_empty(),
        career_interests: interests
            .iter()
            .map(|i| InterestSummary {
                career_id: i.career_id.clone(),
                title: careers
                    .get(&i.career_id)
                    .map_or_else(|| i.career_id.clone(), |c| c.title().to_string()),
                interest_level: i.interest_level,
                is_primary: i.is_primary,
            })
            .collect(),
    };

    if interest_levels.is_empty() {
        debug!(
            "{user_id}: no active career interests, using fallback selection over {:?}",
            category_breakdown(&candidates)
        );
        let recommendations: Vec<Recommendation> =
            select_fallback(candidates, options.limit, rng)
                .iter()
                .map(|m| to_recommendation(m, 0, Vec::new(), FALLBACK_REASON.to_string(), options))
                .collect();
        let message = format!(
            "Showing {} elective modules. Set your career interests for personalized recommendations",
            recommendations.len()
        );
        return Ok(RecommendationResponse {
            recommendations,
            user_stats,
            message,
        });
    }

    let module_codes: Vec<String> = candidates.iter().map(|m| m.code.clone()).collect();
    let career_ids: Vec<String> = interest_levels.keys().map(|c| (*c).to_string()).collect();
    let edges = store.relevance_edges(&module_codes, &career_ids)?;
    let recommendations = rank_modules(&candidates, &edges, &interest_levels, &careers, options);

    let message = if recommendations.is_empty() {
        "No remaining modules match your career interests".to_string()
    } else {
        format!(
            "Found {} modules matching your career interests",
            recommendations.len()
        )
    };
    Ok(RecommendationResponse {
        recommendations,
        user_stats,
        message,
    })
}

/// Module counts per category
#[must_use]
pub fn category_breakdown(modules: &[Module]) -> BTreeMap<ModuleCategory, usize> {
    let mut counts = BTreeMap::new();
    for module in modules {
        *counts.entry(module.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(module: &str, career: &str, score: u8) -> ModuleCareerRelevance {
        ModuleCareerRelevance::derived(module.to_string(), career.to_string(), score)
    }

    fn module(code: &str) -> Module {
        Module::new(code.to_string(), code.to_string(), 5, ModuleCategory::RestrictedElective)
    }

    fn careers(ids: &[&str]) -> HashMap<String, CareerPath> {
        ids.iter()
            .map(|id| {
                let title = format!("Title {id}");
                ((*id).to_string(), CareerPath::new((*id).to_string(), title))
            })
            .collect()
    }

    #[test]
    fn test_weighted_score_example() {
        let a = edge("M", "a", 80);
        let b = edge("M", "b", 40);
        let levels: HashMap<&str, u8> = [("a", 50), ("b", 100)].into_iter().collect();

        assert_eq!(weighted_score(&[&a, &b], &levels), 8000);
    }

    #[test]
    fn test_equal_sums_tie_on_module_code() {
        // 1*10 + 2*10 and 3*10 are both 0.3 points
        let candidates = vec![module("B"), module("A")];
        let edges = vec![edge("B", "x", 1), edge("B", "y", 2), edge("A", "x", 3)];
        let levels: HashMap<&str, u8> = [("x", 10), ("y", 10)].into_iter().collect();

        let ranked = rank_modules(
            &candidates,
            &edges,
            &levels,
            &careers(&["x", "y"]),
            &RecommendOptions::default(),
        );
        let order: Vec<(&str, u32)> = ranked
            .iter()
            .map(|r| (r.module_code.as_str(), r.score_hundredths))
            .collect();
        assert_eq!(order, vec![("A", 30), ("B", 30)]);
        assert!((ranked[0].total_score - ranked[1].total_score).abs() < f64::EPSILON);
    }

    #[test]
    fn test_small_personalized_scores_round_to_one() {
        assert_eq!(rounded_score(0), 0);
        assert_eq!(rounded_score(30), 1);
        assert_eq!(rounded_score(149), 1);
        assert_eq!(rounded_score(150), 2);
        assert_eq!(rounded_score(8000), 80);

        let candidates = vec![module("M1")];
        let edges = vec![edge("M1", "a", 3)];
        let levels: HashMap<&str, u8> = [("a", 10)].into_iter().collect();
        let ranked = rank_modules(
            &candidates,
            &edges,
            &levels,
            &careers(&["a"]),
            &RecommendOptions::default(),
        );
        assert_eq!(ranked[0].relevance_score, 1);
    }

    #[test]
    fn test_zero_score_modules_excluded() {
        let candidates = vec![module("M1"), module("M2"), module("M3")];
        let edges = vec![edge("M1", "a", 50), edge("M2", "a", 70), edge("M3", "b", 90)];
        let levels: HashMap<&str, u8> = [("a", 0), ("b", 10)].into_iter().collect();

        let ranked = rank_modules(
            &candidates,
            &edges,
            &levels,
            &careers(&["a", "b"]),
            &RecommendOptions::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].module_code, "M3");
        assert_eq!(ranked[0].relevance_score, 9);
    }

    #[test]
    fn test_ties_broken_by_module_code() {
        let candidates = vec![module("M3"), module("M1"), module("M2")];
        let edges = vec![edge("M3", "a", 40), edge("M1", "a", 40), edge("M2", "a", 90)];
        let levels: HashMap<&str, u8> = [("a", 100)].into_iter().collect();

        let ranked = rank_modules(
            &candidates,
            &edges,
            &levels,
            &careers(&["a"]),
            &RecommendOptions::default(),
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.module_code.as_str()).collect();
        assert_eq!(order, vec!["M2", "M1", "M3"]);
    }

    #[test]
    fn test_reason_names_top_three() {
        let candidates = vec![module("M1")];
        let edges = vec![
            edge("M1", "a", 10),
            edge("M1", "b", 90),
            edge("M1", "c", 50),
            edge("M1", "d", 70),
        ];
        let levels: HashMap<&str, u8> =
            [("a", 100), ("b", 100), ("c", 100), ("d", 100)].into_iter().collect();

        let ranked = rank_modules(
            &candidates,
            &edges,
            &levels,
            &careers(&["a", "b", "c", "d"]),
            &RecommendOptions::default(),
        );
        let rec = &ranked[0];
        assert_eq!(rec.matching_careers.len(), 4);
        assert_eq!(rec.matching_careers[0].career_id, "b");
        assert_eq!(
            rec.recommendation_reason,
            "Relevant for: Title b, Title d, Title c"
        );
        assert_eq!(rec.relevance_score, 220);
    }

    #[test]
    fn test_limit_truncates() {
        let candidates: Vec<Module> = (1..=5).map(|i| module(&format!("M{i}"))).collect();
        let edges: Vec<ModuleCareerRelevance> = (1..=5)
            .map(|i| edge(&format!("M{i}"), "a", 20))
            .collect();
        let levels: HashMap<&str, u8> = [("a", 100)].into_iter().collect();
        let options = RecommendOptions {
            limit: Limit::new(2).unwrap(),
            ..RecommendOptions::default()
        };

        let ranked = rank_modules(&candidates, &edges, &levels, &careers(&["a"]), &options);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("kurz", 300), "kurz");
        assert_eq!(preview("Größenordnung", 5), "Größe...");
        assert_eq!(preview("ab cd", 3), "ab...");
    }

    #[test]
    fn test_category_breakdown() {
        let mut mandatory = module("P1");
        mandatory.category = ModuleCategory::MandatoryCore;
        let counts = category_breakdown(&[module("E1"), module("E2"), mandatory]);
        assert_eq!(counts.get(&ModuleCategory::RestrictedElective), Some(&2));
        assert_eq!(counts.get(&ModuleCategory::MandatoryCore), Some(&1));
    }
}
