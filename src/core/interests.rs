//! Setting and clearing a student's career interests

use crate::core::error::{StoreError, StoreResult, ValidationError};
use crate::core::models::UserCareerInterest;
use crate::core::store::{CatalogStore, InterestStore, UserDirectory};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One entry of an interest payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestInput {
    /// Career slug
    pub career_id: String,
    /// Interest level in 0..=100
    pub interest_level: u8,
    /// Mark as the primary interest
    #[serde(default)]
    pub is_primary: bool,
}

impl InterestInput {
    /// Reject levels above 100
    ///
    /// # Errors
    /// Returns a `ValidationError` on `interest_level`
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interest_level > 100 {
            return Err(ValidationError::new(
                "interest_level",
                format!(
                    "{} for '{}' is outside 0..=100",
                    self.interest_level, self.career_id
                ),
            ));
        }
        if self.career_id.trim().is_empty() {
            return Err(ValidationError::new("career_id", "must not be empty"));
        }
        Ok(())
    }
}

impl FromStr for InterestInput {
    type Err = ValidationError;

    /// Parse `career_id:level` with an optional `:primary` suffix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let career_id = parts.next().unwrap_or_default().to_string();
        let level = parts
            .next()
            .ok_or_else(|| ValidationError::new("interest", format!("'{s}' lacks a level")))?;
        let interest_level = level.parse::<u8>().map_err(|_| {
            ValidationError::new("interest_level", format!("'{level}' is not in 0..=100"))
        })?;
        let is_primary = match parts.next() {
            None => false,
            Some(flag) if flag.eq_ignore_ascii_case("primary") => true,
            Some(flag) => {
                return Err(ValidationError::new(
                    "interest",
                    format!("unexpected flag '{flag}' in '{s}'"),
                ))
            }
        };
        if parts.next().is_some() {
            return Err(ValidationError::new(
                "interest",
                format!("'{s}' has too many fields"),
            ));
        }
        let input = Self {
            career_id,
            interest_level,
            is_primary,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Outcome of a bulk interest update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterestUpdate {
    /// Interests stored
    pub applied: usize,
    /// Career ids skipped because they are unknown
    pub skipped: Vec<String>,
}

fn ensure_user<S: UserDirectory>(store: &S, user_id: &str) -> StoreResult<()> {
    store
        .user(user_id)?
        .map(|_| ())
        .ok_or_else(|| StoreError::not_found("user", user_id))
}

/// Replace a user's whole interest set.
///
/// Unknown career ids are skipped and reported, not rejected. Repeated career
/// ids keep the last entry; when several entries are primary the last one stays
/// primary.
///
/// # Errors
/// Returns a validation error (wrapped in `StoreError::Invalid`) before touching
/// the store if any level is out of range, `NotFound` for an unknown user, and
/// any storage failure unchanged.
pub fn replace_interests<S>(
    store: &mut S,
    user_id: &str,
    inputs: &[InterestInput],
) -> StoreResult<InterestUpdate>
where
    S: CatalogStore + InterestStore + UserDirectory,
{
    for input in inputs {
        input.validate()?;
    }
    ensure_user(store, user_id)?;

    let mut update = InterestUpdate::default();
    let mut accepted: Vec<UserCareerInterest> = Vec::new();
    for input in inputs {
        if store.career(&input.career_id)?.is_none() {
            debug!("Skipping unknown career '{}' for {user_id}", input.career_id);
            update.skipped.push(input.career_id.clone());
            continue;
        }
        accepted.retain(|i| i.career_id != input.career_id);
        if input.is_primary {
            for other in &mut accepted {
                other.is_primary = false;
            }
        }
        accepted.push(UserCareerInterest {
            user_id: user_id.to_string(),
            career_id: input.career_id.clone(),
            interest_level: input.interest_level,
            is_primary: input.is_primary,
        });
    }

    update.applied = accepted.len();
    store.replace_interests(user_id, accepted)?;
    Ok(update)
}

/// Set a single interest. A primary interest takes the flag from any previous one.
///
/// # Errors
/// Returns `NotFound` for an unknown user or career, `Invalid` for an
/// out-of-range level, and any storage failure unchanged.
pub fn set_interest<S>(store: &mut S, user_id: &str, input: &InterestInput) -> StoreResult<()>
where
    S: CatalogStore + InterestStore + UserDirectory,
{
    input.validate()?;
    ensure_user(store, user_id)?;
    if store.career(&input.career_id)?.is_none() {
        return Err(StoreError::not_found("career", &input.career_id));
    }
    store.put_interest(UserCareerInterest {
        user_id: user_id.to_string(),
        career_id: input.career_id.clone(),
        interest_level: input.interest_level,
        is_primary: input.is_primary,
    })
}

/// Remove a single interest
///
/// # Errors
/// Returns `NotFound` when the user has no interest in that career
pub fn unset_interest<S: InterestStore>(
    store: &mut S,
    user_id: &str,
    career_id: &str,
) -> StoreResult<()> {
    if store.remove_interest(user_id, career_id)? {
        Ok(())
    } else {
        Err(StoreError::not_found("interest", format!("{user_id}/{career_id}")))
    }
}

/// Interests of a user paired with the display title of their career.
/// Careers missing from the catalog are shown by slug.
///
/// # Errors
/// Passes store failures through unchanged
pub fn titled_interests<S>(
    store: &S,
    user_id: &str,
) -> StoreResult<Vec<(UserCareerInterest, String)>>
where
    S: CatalogStore + InterestStore,
{
    store
        .interests(user_id)?
        .into_iter()
        .map(|interest| {
            let title = store
                .career(&interest.career_id)?
                .map_or_else(|| interest.career_id.clone(), |c| c.title().to_string());
            Ok((interest, title))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CareerPath, Module, ModuleCareerRelevance, User};
    use crate::core::store::MemoryStore;

    /// Store whose career lookups fail
    struct UnreadableCareers(MemoryStore);

    impl CatalogStore for UnreadableCareers {
        fn candidate_modules(&self, regulation: Option<&str>) -> StoreResult<Vec<Module>> {
            self.0.candidate_modules(regulation)
        }
        fn modules_by_code(&self, codes: &[String]) -> StoreResult<Vec<Module>> {
            self.0.modules_by_code(codes)
        }
        fn relevance_edges(
            &self,
            module_codes: &[String],
            career_ids: &[String],
        ) -> StoreResult<Vec<ModuleCareerRelevance>> {
            self.0.relevance_edges(module_codes, career_ids)
        }
        fn career(&self, career_id: &str) -> StoreResult<Option<CareerPath>> {
            Err(StoreError::Io(std::io::Error::other(format!(
                "cannot read career {career_id}"
            ))))
        }
        fn careers(&self) -> StoreResult<Vec<CareerPath>> {
            self.0.careers()
        }
        fn upsert_module(&mut self, module: Module) -> StoreResult<()> {
            self.0.upsert_module(module)
        }
        fn upsert_career(&mut self, career: CareerPath) -> StoreResult<()> {
            self.0.upsert_career(career)
        }
        fn upsert_relevance(&mut self, edge: ModuleCareerRelevance) -> StoreResult<()> {
            self.0.upsert_relevance(edge)
        }
        fn remove_relevance(&mut self, module_code: &str, career_id: &str) -> StoreResult<bool> {
            self.0.remove_relevance(module_code, career_id)
        }
        fn clear_catalog(&mut self) -> StoreResult<()> {
            self.0.clear_catalog()
        }
    }

    impl InterestStore for UnreadableCareers {
        fn interests(&self, user_id: &str) -> StoreResult<Vec<UserCareerInterest>> {
            self.0.interests(user_id)
        }
        fn put_interest(&mut self, interest: UserCareerInterest) -> StoreResult<()> {
            self.0.put_interest(interest)
        }
        fn replace_interests(
            &mut self,
            user_id: &str,
            interests: Vec<UserCareerInterest>,
        ) -> StoreResult<()> {
            self.0.replace_interests(user_id, interests)
        }
        fn remove_interest(&mut self, user_id: &str, career_id: &str) -> StoreResult<bool> {
            self.0.remove_interest(user_id, career_id)
        }
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        for id in ["data_scientist", "ml_engineer", "qa_engineer"] {
            store
                .upsert_career(CareerPath::new(id.to_string(), id.to_string()))
                .unwrap();
        }
        store.add_user(User::new("anna".to_string(), None)).unwrap();
        store
    }

    fn input(career: &str, level: u8, primary: bool) -> InterestInput {
        InterestInput {
            career_id: career.to_string(),
            interest_level: level,
            is_primary: primary,
        }
    }

    #[test]
    fn test_parse_interest_input() {
        assert_eq!(
            "data_scientist:80:primary".parse(),
            Ok(input("data_scientist", 80, true))
        );
        assert_eq!("qa_engineer: 20".parse(), Ok(input("qa_engineer", 20, false)));
        assert!("qa_engineer".parse::<InterestInput>().is_err());
        assert!("qa_engineer:101".parse::<InterestInput>().is_err());
        assert!("qa_engineer:-5".parse::<InterestInput>().is_err());
        assert!("qa_engineer:5:main".parse::<InterestInput>().is_err());
        assert!(":5".parse::<InterestInput>().is_err());
    }

    #[test]
    fn test_replace_skips_unknown_careers() {
        let mut store = store();
        let update = replace_interests(
            &mut store,
            "anna",
            &[input("data_scientist", 80, true), input("astronaut", 90, false)],
        )
        .unwrap();

        assert_eq!(update.applied, 1);
        assert_eq!(update.skipped, vec!["astronaut".to_string()]);
        assert_eq!(store.interests("anna").unwrap().len(), 1);
    }

    #[test]
    fn test_replace_clears_previous_set() {
        let mut store = store();
        replace_interests(&mut store, "anna", &[input("data_scientist", 80, true)]).unwrap();
        replace_interests(&mut store, "anna", &[input("qa_engineer", 40, false)]).unwrap();

        let interests = store.interests("anna").unwrap();
        assert_eq!(interests.len(), 1);
        assert_eq!(interests[0].career_id, "qa_engineer");
    }

    #[test]
    fn test_replace_keeps_single_primary() {
        let mut store = store();
        let update = replace_interests(
            &mut store,
            "anna",
            &[
                input("data_scientist", 80, true),
                input("ml_engineer", 60, true),
                input("data_scientist", 70, false),
            ],
        )
        .unwrap();

        assert_eq!(update.applied, 2);
        let interests = store.interests("anna").unwrap();
        let primaries: Vec<_> = interests.iter().filter(|i| i.is_primary).collect();
        assert_eq!(primaries.len(), 1);
        assert_eq!(primaries[0].career_id, "ml_engineer");
        let ds = interests
            .iter()
            .find(|i| i.career_id == "data_scientist")
            .unwrap();
        assert_eq!(ds.interest_level, 70);
    }

    #[test]
    fn test_replace_rejects_invalid_level_without_changes() {
        let mut store = store();
        replace_interests(&mut store, "anna", &[input("qa_engineer", 40, false)]).unwrap();

        let err = replace_interests(&mut store, "anna", &[input("data_scientist", 150, false)])
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(store.interests("anna").unwrap()[0].career_id, "qa_engineer");
    }

    #[test]
    fn test_replace_unknown_user() {
        let mut store = store();
        let err = replace_interests(&mut store, "zoe", &[]).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "user", .. }));
    }

    #[test]
    fn test_set_interest_moves_primary() {
        let mut store = store();
        set_interest(&mut store, "anna", &input("data_scientist", 80, true)).unwrap();
        set_interest(&mut store, "anna", &input("ml_engineer", 50, true)).unwrap();

        let interests = store.interests("anna").unwrap();
        assert_eq!(interests.iter().filter(|i| i.is_primary).count(), 1);
    }

    #[test]
    fn test_set_interest_unknown_career() {
        let mut store = store();
        let err = set_interest(&mut store, "anna", &input("astronaut", 50, false)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "career", .. }));
    }

    #[test]
    fn test_unset_interest() {
        let mut store = store();
        set_interest(&mut store, "anna", &input("qa_engineer", 50, false)).unwrap();
        unset_interest(&mut store, "anna", "qa_engineer").unwrap();
        assert!(store.interests("anna").unwrap().is_empty());
        assert!(unset_interest(&mut store, "anna", "qa_engineer").is_err());
    }

    #[test]
    fn test_titled_interests() {
        let mut store = store();
        store
            .upsert_career(CareerPath::new("tester".to_string(), "Software Tester".to_string()))
            .unwrap();
        set_interest(&mut store, "anna", &input("tester", 70, true)).unwrap();

        let titled = titled_interests(&store, "anna").unwrap();
        assert_eq!(titled.len(), 1);
        assert_eq!(titled[0].0.interest_level, 70);
        assert_eq!(titled[0].1, "Software Tester");
    }

    #[test]
    fn test_titled_interests_propagates_career_read_failure() {
        let mut store = store();
        set_interest(&mut store, "anna", &input("ml_engineer", 40, false)).unwrap();
        let store = UnreadableCareers(store);

        let err = titled_interests(&store, "anna").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("ml_engineer"));
    }
}
