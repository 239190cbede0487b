//! Integration tests for the recommendation engine over the in-memory store

use rand::rngs::StdRng;
use rand::SeedableRng;
use studypath::core::error::RecommendError;
use studypath::core::interests::{replace_interests, InterestInput};
use studypath::core::models::{
    CareerPath, CompletionStatus, Module, ModuleCareerRelevance, ModuleCategory, User,
};
use studypath::core::progress::record_status;
use studypath::core::recommender::{recommend, Limit, RecommendOptions, FALLBACK_REASON};
use studypath::core::store::{CatalogStore, MemoryStore, UserDirectory};

fn module(code: &str, category: ModuleCategory, credits: u32) -> Module {
    let mut module = Module::new(code.to_string(), format!("Modul {code}"), credits, category);
    module.learning_objectives = format!("Ziele von {code}");
    module
}

fn edge(module: &str, career: &str, score: u8) -> ModuleCareerRelevance {
    ModuleCareerRelevance::derived(module.to_string(), career.to_string(), score)
}

fn interest(career: &str, level: u8, primary: bool) -> InterestInput {
    InterestInput {
        career_id: career.to_string(),
        interest_level: level,
        is_primary: primary,
    }
}

/// Catalog of six modules, two careers, one user without interests
fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (code, category) in [
        ("M1", ModuleCategory::RestrictedElective),
        ("M2", ModuleCategory::RestrictedElective),
        ("M3", ModuleCategory::FreeElective),
        ("M4", ModuleCategory::MandatoryCore),
        ("M5", ModuleCategory::RestrictedElective),
        ("M6", ModuleCategory::GeneralStudies),
    ] {
        store.upsert_module(module(code, category, 5)).unwrap();
    }
    store
        .upsert_career(CareerPath::new("a".into(), "Data Scientist".into()))
        .unwrap();
    store
        .upsert_career(CareerPath::new("b".into(), "ML Engineer".into()))
        .unwrap();
    for e in [
        edge("M1", "a", 80),
        edge("M1", "b", 40),
        edge("M2", "a", 60),
        edge("M3", "b", 60),
        edge("M4", "a", 20),
        edge("M5", "a", 100),
    ] {
        store.upsert_relevance(e).unwrap();
    }
    store.add_user(User::new("anna".into(), None)).unwrap();
    store
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn test_weighted_example_scores_eighty() {
    let mut store = seeded_store();
    replace_interests(
        &mut store,
        "anna",
        &[interest("a", 50, true), interest("b", 100, false)],
    )
    .unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    let m1 = response
        .recommendations
        .iter()
        .find(|r| r.module_code == "M1")
        .unwrap();

    assert!((m1.total_score - 80.0).abs() < f64::EPSILON);
    assert_eq!(m1.relevance_score, 80);
    assert_eq!(m1.recommendation_reason, "Relevant for: Data Scientist, ML Engineer");
    assert!(response.user_stats.career_interests_set);
}

#[test]
fn test_ranking_sorted_with_code_tie_break() {
    let mut store = seeded_store();
    replace_interests(
        &mut store,
        "anna",
        &[interest("a", 50, true), interest("b", 100, false)],
    )
    .unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    let order: Vec<(&str, u32)> = response
        .recommendations
        .iter()
        .map(|r| (r.module_code.as_str(), r.relevance_score))
        .collect();

    // M1 = 80, M3 = 60, M5 = 50, M2 = 30, M4 = 10; M6 has no edges
    assert_eq!(
        order,
        vec![("M1", 80), ("M3", 60), ("M5", 50), ("M2", 30), ("M4", 10)]
    );
    assert!(response
        .recommendations
        .windows(2)
        .all(|w| w[0].total_score >= w[1].total_score));
}

#[test]
fn test_equal_scores_ordered_by_code() {
    let mut store = seeded_store();
    store.upsert_relevance(edge("M2", "a", 100)).unwrap();
    replace_interests(&mut store, "anna", &[interest("a", 100, false)]).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    let first_two: Vec<&str> = response
        .recommendations
        .iter()
        .take(2)
        .map(|r| r.module_code.as_str())
        .collect();
    assert_eq!(first_two, vec!["M2", "M5"]);
}

#[test]
fn test_taken_modules_are_excluded() {
    let mut store = seeded_store();
    replace_interests(&mut store, "anna", &[interest("a", 100, true)]).unwrap();
    record_status(&mut store, "anna", "M5", CompletionStatus::Completed, Some(1.0)).unwrap();
    record_status(&mut store, "anna", "M1", CompletionStatus::InProgress, None).unwrap();
    record_status(&mut store, "anna", "M2", CompletionStatus::Failed, None).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    let codes: Vec<&str> = response
        .recommendations
        .iter()
        .map(|r| r.module_code.as_str())
        .collect();

    assert!(!codes.contains(&"M5"));
    assert!(!codes.contains(&"M1"));
    assert!(codes.contains(&"M2"));
    assert_eq!(response.user_stats.completed_modules, 1);
    assert_eq!(response.user_stats.completed_credits, 5);
}

#[test]
fn test_limit_bounds_result_length() {
    let mut store = seeded_store();
    replace_interests(&mut store, "anna", &[interest("a", 100, true)]).unwrap();

    for n in 1..=6 {
        let options = RecommendOptions {
            limit: Limit::new(n).unwrap(),
            ..RecommendOptions::default()
        };
        let response = recommend(&store, "anna", &options, &mut rng()).unwrap();
        assert!(response.recommendations.len() <= n);
    }
}

#[test]
fn test_fallback_without_interests() {
    let store = seeded_store();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();

    assert!(!response.user_stats.career_interests_set);
    assert!(response.user_stats.career_interests.is_empty());
    assert_eq!(response.recommendations.len(), 4);
    for rec in &response.recommendations {
        assert_eq!(rec.relevance_score, 0);
        assert_eq!(rec.recommendation_reason, FALLBACK_REASON);
        assert!(rec.category.is_specialization());
        assert!(rec.matching_careers.is_empty());
    }
}

#[test]
fn test_fallback_is_reproducible_with_seed() {
    let store = seeded_store();
    let options = RecommendOptions::default();

    let first = recommend(&store, "anna", &options, &mut StdRng::seed_from_u64(99)).unwrap();
    let second = recommend(&store, "anna", &options, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_inactive_career_counts_as_no_interest() {
    let mut store = seeded_store();
    replace_interests(&mut store, "anna", &[interest("a", 100, true)]).unwrap();
    let mut career = store.career("a").unwrap().unwrap();
    career.is_active = false;
    store.upsert_career(career).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    assert!(!response.user_stats.career_interests_set);
    assert_eq!(response.user_stats.career_interests.len(), 1);
}

#[test]
fn test_zero_interest_levels_yield_empty_list() {
    let mut store = seeded_store();
    replace_interests(&mut store, "anna", &[interest("a", 0, true)]).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    assert!(response.user_stats.career_interests_set);
    assert!(response.recommendations.is_empty());
}

#[test]
fn test_regulation_without_modules_is_empty_not_error() {
    let mut store = seeded_store();
    store
        .add_user(User::new("ben".into(), Some("MSc-2023".into())))
        .unwrap();
    replace_interests(&mut store, "ben", &[interest("a", 100, true)]).unwrap();

    let response = recommend(&store, "ben", &RecommendOptions::default(), &mut rng()).unwrap();
    assert!(response.recommendations.is_empty());
}

#[test]
fn test_unknown_user() {
    let store = seeded_store();
    let err = recommend(&store, "zoe", &RecommendOptions::default(), &mut rng()).unwrap_err();
    assert!(matches!(err, RecommendError::UnknownUser(id) if id == "zoe"));
}

#[test]
fn test_objectives_preview_truncated() {
    let mut store = seeded_store();
    let mut long = module("M7", ModuleCategory::RestrictedElective, 5);
    long.learning_objectives = "x".repeat(400);
    store.upsert_module(long).unwrap();
    store.upsert_relevance(edge("M7", "a", 90)).unwrap();
    replace_interests(&mut store, "anna", &[interest("a", 100, true)]).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    let m7 = response
        .recommendations
        .iter()
        .find(|r| r.module_code == "M7")
        .unwrap();
    assert_eq!(m7.learning_objectives.chars().count(), 303);
    assert!(m7.learning_objectives.ends_with("..."));
}

#[test]
fn test_response_json_shape() {
    let mut store = seeded_store();
    replace_interests(&mut store, "anna", &[interest("a", 100, true)]).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let first = &json["recommendations"][0];
    assert_eq!(first["module_code"], "M5");
    assert_eq!(first["relevance_score"], 100);
    assert_eq!(first["category"], "restricted_elective");
    assert!(first.get("total_score").is_none());
    assert_eq!(first["matching_careers"][0]["career_title"], "Data Scientist");
    assert_eq!(json["user_stats"]["career_interests"][0]["is_primary"], true);
    assert_eq!(
        json["message"],
        "Found 4 modules matching your career interests"
    );
}

#[test]
fn test_removing_user_cascades() {
    let mut store = seeded_store();
    replace_interests(&mut store, "anna", &[interest("a", 100, true)]).unwrap();
    record_status(&mut store, "anna", "M1", CompletionStatus::Completed, None).unwrap();

    assert!(store.remove_user("anna").unwrap());
    store.add_user(User::new("anna".into(), None)).unwrap();

    let response = recommend(&store, "anna", &RecommendOptions::default(), &mut rng()).unwrap();
    assert!(!response.user_stats.career_interests_set);
    assert_eq!(response.user_stats.completed_modules, 0);
}
