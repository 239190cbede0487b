//! Unpersonalized selection for users without career interests

use super::Limit;
use crate::core::models::Module;
use rand::seq::SliceRandom;
use rand::Rng;

/// Explanation attached to every fallback recommendation
pub const FALLBACK_REASON: &str = "Set your career interests for personalized recommendations";

/// Pick up to `limit` specialization electives in random order.
///
/// Candidates are put in module-code order before shuffling, so a seeded
/// generator always yields the same permutation for the same pool.
pub fn select_fallback<R: Rng + ?Sized>(
    candidates: Vec<Module>,
    limit: Limit,
    rng: &mut R,
) -> Vec<Module> {
    let mut pool: Vec<Module> = candidates
        .into_iter()
        .filter(|m| m.category.is_specialization())
        .collect();
    pool.sort_by(|a, b| a.code.cmp(&b.code));
    pool.shuffle(rng);
    pool.truncate(limit.get());
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ModuleCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn module(code: &str, category: ModuleCategory) -> Module {
        Module::new(code.to_string(), code.to_string(), 5, category)
    }

    fn pool() -> Vec<Module> {
        vec![
            module("E3", ModuleCategory::RestrictedElective),
            module("P1", ModuleCategory::MandatoryCore),
            module("E1", ModuleCategory::FreeElective),
            module("T1", ModuleCategory::ThesisArea),
            module("E2", ModuleCategory::RestrictedElective),
            module("E4", ModuleCategory::FreeElective),
        ]
    }

    fn codes(modules: &[Module]) -> Vec<String> {
        modules.iter().map(|m| m.code.clone()).collect()
    }

    #[test]
    fn test_only_specialization_categories() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_fallback(pool(), Limit::DEFAULT, &mut rng);

        let mut picked_codes = codes(&picked);
        picked_codes.sort();
        assert_eq!(picked_codes, vec!["E1", "E2", "E3", "E4"]);
    }

    #[test]
    fn test_respects_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        let limit = Limit::new(2).unwrap();
        assert_eq!(select_fallback(pool(), limit, &mut rng).len(), 2);
    }

    #[test]
    fn test_same_seed_same_permutation() {
        let first = select_fallback(pool(), Limit::DEFAULT, &mut StdRng::seed_from_u64(42));
        let mut reversed = pool();
        reversed.reverse();
        let second = select_fallback(reversed, Limit::DEFAULT, &mut StdRng::seed_from_u64(42));

        assert_eq!(codes(&first), codes(&second));
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_fallback(Vec::new(), Limit::DEFAULT, &mut rng).is_empty());
    }
}
