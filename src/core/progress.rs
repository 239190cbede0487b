//! Recording module completion status

use crate::core::error::{StoreError, StoreResult, ValidationError};
use crate::core::models::{CompletionStatus, UserModuleCompletion};
use crate::core::store::{CatalogStore, CompletionTracker, UserDirectory};
use std::time::{SystemTime, UNIX_EPOCH};

/// Lowest and highest grades on the German 1.0 to 5.0 scale
const GRADE_RANGE: (f32, f32) = (1.0, 5.0);

/// Seconds since the Unix epoch, or 0 if the clock is before it
#[must_use]
pub fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Record a module status for a user, replacing any earlier record.
///
/// A completed module without an explicit timestamp is stamped with the
/// current time; other statuses carry no timestamp.
///
/// # Errors
/// Returns `NotFound` for an unknown user or module, `Invalid` for a grade
/// outside 1.0..=5.0, and any storage failure unchanged.
pub fn record_status<S>(
    store: &mut S,
    user_id: &str,
    module_code: &str,
    status: CompletionStatus,
    grade: Option<f32>,
) -> StoreResult<UserModuleCompletion>
where
    S: CatalogStore + CompletionTracker + UserDirectory,
{
    if let Some(g) = grade {
        if !(GRADE_RANGE.0..=GRADE_RANGE.1).contains(&g) {
            return Err(ValidationError::new("grade", format!("{g} is outside 1.0..=5.0")).into());
        }
    }
    if store.user(user_id)?.is_none() {
        return Err(StoreError::not_found("user", user_id));
    }
    if store
        .modules_by_code(&[module_code.to_string()])?
        .is_empty()
    {
        return Err(StoreError::not_found("module", module_code));
    }

    let completed_at = (status == CompletionStatus::Completed).then(now_epoch_seconds);
    let completion = UserModuleCompletion {
        user_id: user_id.to_string(),
        module_code: module_code.to_string(),
        status,
        completed_at,
        grade,
    };
    store.put_completion(completion.clone())?;
    Ok(completion)
}

/// Completed module count and their credit sum for a user
///
/// # Errors
/// Returns any storage failure unchanged
pub fn completed_totals<S>(store: &S, user_id: &str) -> StoreResult<(usize, u32)>
where
    S: CatalogStore + CompletionTracker,
{
    let codes: Vec<String> = store
        .completions(user_id)?
        .into_iter()
        .filter(|c| c.status == CompletionStatus::Completed)
        .map(|c| c.module_code)
        .collect();
    let credits = store
        .modules_by_code(&codes)?
        .iter()
        .map(|m| m.credits)
        .sum();
    Ok((codes.len(), credits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Module, ModuleCategory, User};
    use crate::core::store::MemoryStore;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.add_user(User::new("anna".to_string(), None)).unwrap();
        store
            .upsert_module(Module::new("M1".into(), "Logik".into(), 5, ModuleCategory::MandatoryCore))
            .unwrap();
        store
            .upsert_module(Module::new("M2".into(), "Analysis".into(), 9, ModuleCategory::MandatoryCore))
            .unwrap();
        store
    }

    #[test]
    fn test_completed_gets_timestamp() {
        let mut store = store();
        let record =
            record_status(&mut store, "anna", "M1", CompletionStatus::Completed, Some(1.7))
                .unwrap();
        assert!(record.completed_at.is_some());

        let record =
            record_status(&mut store, "anna", "M2", CompletionStatus::InProgress, None).unwrap();
        assert!(record.completed_at.is_none());
    }

    #[test]
    fn test_status_replaces_previous_record() {
        let mut store = store();
        record_status(&mut store, "anna", "M1", CompletionStatus::InProgress, None).unwrap();
        record_status(&mut store, "anna", "M1", CompletionStatus::Failed, Some(5.0)).unwrap();

        let completions = store.completions("anna").unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].status, CompletionStatus::Failed);
    }

    #[test]
    fn test_unknown_module_and_user() {
        let mut store = store();
        assert!(matches!(
            record_status(&mut store, "anna", "M9", CompletionStatus::Completed, None),
            Err(StoreError::NotFound { kind: "module", .. })
        ));
        assert!(matches!(
            record_status(&mut store, "zoe", "M1", CompletionStatus::Completed, None),
            Err(StoreError::NotFound { kind: "user", .. })
        ));
    }

    #[test]
    fn test_grade_out_of_range() {
        let mut store = store();
        assert!(matches!(
            record_status(&mut store, "anna", "M1", CompletionStatus::Completed, Some(0.7)),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn test_completed_totals() {
        let mut store = store();
        record_status(&mut store, "anna", "M1", CompletionStatus::Completed, None).unwrap();
        record_status(&mut store, "anna", "M2", CompletionStatus::InProgress, None).unwrap();

        assert_eq!(completed_totals(&store, "anna").unwrap(), (1, 5));
        assert_eq!(completed_totals(&store, "zoe").unwrap(), (0, 0));
    }
}
