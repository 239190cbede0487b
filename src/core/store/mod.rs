//! Data-access contracts used by the recommender, importer and user operations.
//!
//! Every read returns a materialized collection; nothing hands out a live
//! query. Implementations must keep the pair invariants: one relevance edge per
//! (module, career), one interest per (user, career), one completion per
//! (user, module) and at most one primary interest per user.

pub mod memory;

pub use memory::MemoryStore;

use crate::core::error::StoreResult;
use crate::core::models::{
    CareerPath, Module, ModuleCareerRelevance, User, UserCareerInterest, UserModuleCompletion,
};

/// Read/write access to modules, career paths and relevance edges
pub trait CatalogStore {
    /// Modules of a regulation, or every module when `regulation` is `None`,
    /// ordered by module code
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn candidate_modules(&self, regulation: Option<&str>) -> StoreResult<Vec<Module>>;

    /// Look up modules by code; unknown codes are ignored
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn modules_by_code(&self, codes: &[String]) -> StoreResult<Vec<Module>>;

    /// Relevance edges whose module is in `module_codes` and career in `career_ids`
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn relevance_edges(
        &self,
        module_codes: &[String],
        career_ids: &[String],
    ) -> StoreResult<Vec<ModuleCareerRelevance>>;

    /// Look up a career path by slug
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn career(&self, career_id: &str) -> StoreResult<Option<CareerPath>>;

    /// All career paths, ordered by slug
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn careers(&self) -> StoreResult<Vec<CareerPath>>;

    /// Insert or replace a module keyed by its code
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn upsert_module(&mut self, module: Module) -> StoreResult<()>;

    /// Insert or replace a career path keyed by its slug
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn upsert_career(&mut self, career: CareerPath) -> StoreResult<()>;

    /// Insert or replace an edge keyed by (module, career)
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn upsert_relevance(&mut self, edge: ModuleCareerRelevance) -> StoreResult<()>;

    /// Remove the edge for (module, career); returns whether one existed
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn remove_relevance(&mut self, module_code: &str, career_id: &str) -> StoreResult<bool>;

    /// Drop all modules, careers and relevance edges
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn clear_catalog(&mut self) -> StoreResult<()>;
}

/// Per-user career interests
pub trait InterestStore {
    /// Interests of a user, ordered by career slug
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn interests(&self, user_id: &str) -> StoreResult<Vec<UserCareerInterest>>;

    /// Insert or replace one interest. When it is primary, every other
    /// primary flag of the user is cleared in the same operation.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn put_interest(&mut self, interest: UserCareerInterest) -> StoreResult<()>;

    /// Replace the whole interest set of a user in one operation
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn replace_interests(
        &mut self,
        user_id: &str,
        interests: Vec<UserCareerInterest>,
    ) -> StoreResult<()>;

    /// Remove one interest; returns whether it existed
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn remove_interest(&mut self, user_id: &str, career_id: &str) -> StoreResult<bool>;
}

/// Per-user module completion records
pub trait CompletionTracker {
    /// Completion records of a user, ordered by module code
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn completions(&self, user_id: &str) -> StoreResult<Vec<UserModuleCompletion>>;

    /// Insert or replace the record for (user, module)
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn put_completion(&mut self, completion: UserModuleCompletion) -> StoreResult<()>;
}

/// Registered students
pub trait UserDirectory {
    /// Look up a user
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn user(&self, user_id: &str) -> StoreResult<Option<User>>;

    /// Register a new user
    ///
    /// # Errors
    /// Returns `StoreError::Conflict` if the id is taken
    fn add_user(&mut self, user: User) -> StoreResult<()>;

    /// Remove a user together with all of their interests and completions.
    /// Returns whether the user existed.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn remove_user(&mut self, user_id: &str) -> StoreResult<bool>;
}
