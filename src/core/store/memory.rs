//! In-memory store with JSON snapshot persistence

use super::{CatalogStore, CompletionTracker, InterestStore, UserDirectory};
use crate::core::error::{StoreError, StoreResult};
use crate::core::models::{
    CareerPath, Module, ModuleCareerRelevance, User, UserCareerInterest, UserModuleCompletion,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

type PairKey = (String, String);

/// Store holding every collection in ordered maps.
///
/// All state lives in this value; persistence is an explicit [`save`](Self::save).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    modules: BTreeMap<String, Module>,
    careers: BTreeMap<String, CareerPath>,
    relevance: BTreeMap<PairKey, ModuleCareerRelevance>,
    users: BTreeMap<String, User>,
    interests: BTreeMap<PairKey, UserCareerInterest>,
    completions: BTreeMap<PairKey, UserModuleCompletion>,
}

/// On-disk layout of a [`MemoryStore`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    modules: Vec<Module>,
    #[serde(default)]
    careers: Vec<CareerPath>,
    #[serde(default)]
    relevance: Vec<ModuleCareerRelevance>,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    interests: Vec<UserCareerInterest>,
    #[serde(default)]
    completions: Vec<UserModuleCompletion>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot. A missing file yields an empty store.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build a store from snapshot JSON, re-applying the pair invariants
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the snapshot layout
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut store = Self::new();
        for module in snapshot.modules {
            store.modules.insert(module.code.clone(), module);
        }
        for career in snapshot.careers {
            store.careers.insert(career.career_id.clone(), career);
        }
        for edge in snapshot.relevance {
            store.relevance.insert(edge.key(), edge);
        }
        for user in snapshot.users {
            store.users.insert(user.id.clone(), user);
        }
        for interest in snapshot.interests {
            store.insert_interest(interest);
        }
        for completion in snapshot.completions {
            let key = (completion.user_id.clone(), completion.module_code.clone());
            store.completions.insert(key, completion);
        }
        Ok(store)
    }

    /// Serialize the store as pretty-printed snapshot JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> StoreResult<String> {
        let snapshot = Snapshot {
            modules: self.modules.values().cloned().collect(),
            careers: self.careers.values().cloned().collect(),
            relevance: self.relevance.values().cloned().collect(),
            users: self.users.values().cloned().collect(),
            interests: self.interests.values().cloned().collect(),
            completions: self.completions.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Write the snapshot to `path`, replacing the previous file in one rename
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, self.to_json()?)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Number of modules in the catalog
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Number of relevance edges in the catalog
    #[must_use]
    pub fn relevance_count(&self) -> usize {
        self.relevance.len()
    }

    /// All relevance edges, ordered by (module, career)
    #[must_use]
    pub fn all_relevance(&self) -> Vec<ModuleCareerRelevance> {
        self.relevance.values().cloned().collect()
    }

    /// All registered users, ordered by id
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn insert_interest(&mut self, interest: UserCareerInterest) {
        if interest.is_primary {
            for existing in self
                .interests
                .values_mut()
                .filter(|i| i.user_id == interest.user_id)
            {
                existing.is_primary = false;
            }
        }
        let key = (interest.user_id.clone(), interest.career_id.clone());
        self.interests.insert(key, interest);
    }

    fn user_keys<V>(map: &BTreeMap<PairKey, V>, user_id: &str) -> Vec<PairKey> {
        map.keys()
            .filter(|(owner, _)| owner == user_id)
            .cloned()
            .collect()
    }
}

impl CatalogStore for MemoryStore {
    fn candidate_modules(&self, regulation: Option<&str>) -> StoreResult<Vec<Module>> {
        Ok(self
            .modules
            .values()
            .filter(|m| m.in_regulation(regulation))
            .cloned()
            .collect())
    }

    fn modules_by_code(&self, codes: &[String]) -> StoreResult<Vec<Module>> {
        Ok(codes
            .iter()
            .filter_map(|code| self.modules.get(code))
            .cloned()
            .collect())
    }

    fn relevance_edges(
        &self,
        module_codes: &[String],
        career_ids: &[String],
    ) -> StoreResult<Vec<ModuleCareerRelevance>> {
        let modules: HashSet<&str> = module_codes.iter().map(String::as_str).collect();
        let careers: HashSet<&str> = career_ids.iter().map(String::as_str).collect();
        Ok(self
            .relevance
            .values()
            .filter(|e| {
                modules.contains(e.module_code.as_str()) && careers.contains(e.career_id.as_str())
            })
            .cloned()
            .collect())
    }

    fn career(&self, career_id: &str) -> StoreResult<Option<CareerPath>> {
        Ok(self.careers.get(career_id).cloned())
    }

    fn careers(&self) -> StoreResult<Vec<CareerPath>> {
        Ok(self.careers.values().cloned().collect())
    }

    fn upsert_module(&mut self, module: Module) -> StoreResult<()> {
        self.modules.insert(module.code.clone(), module);
        Ok(())
    }

    fn upsert_career(&mut self, career: CareerPath) -> StoreResult<()> {
        self.careers.insert(career.career_id.clone(), career);
        Ok(())
    }

    fn upsert_relevance(&mut self, edge: ModuleCareerRelevance) -> StoreResult<()> {
        self.relevance.insert(edge.key(), edge);
        Ok(())
    }

    fn remove_relevance(&mut self, module_code: &str, career_id: &str) -> StoreResult<bool> {
        Ok(self
            .relevance
            .remove(&(module_code.to_string(), career_id.to_string()))
            .is_some())
    }

    fn clear_catalog(&mut self) -> StoreResult<()> {
        self.relevance.clear();
        self.careers.clear();
        self.modules.clear();
        Ok(())
    }
}

impl InterestStore for MemoryStore {
    fn interests(&self, user_id: &str) -> StoreResult<Vec<UserCareerInterest>> {
        Ok(self
            .interests
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    fn put_interest(&mut self, interest: UserCareerInterest) -> StoreResult<()> {
        self.insert_interest(interest);
        Ok(())
    }

    fn replace_interests(
        &mut self,
        user_id: &str,
        interests: Vec<UserCareerInterest>,
    ) -> StoreResult<()> {
        for key in Self::user_keys(&self.interests, user_id) {
            self.interests.remove(&key);
        }
        for interest in interests.into_iter().filter(|i| i.user_id == user_id) {
            self.insert_interest(interest);
        }
        Ok(())
    }

    fn remove_interest(&mut self, user_id: &str, career_id: &str) -> StoreResult<bool> {
        Ok(self
            .interests
            .remove(&(user_id.to_string(), career_id.to_string()))
            .is_some())
    }
}

impl CompletionTracker for MemoryStore {
    fn completions(&self, user_id: &str) -> StoreResult<Vec<UserModuleCompletion>> {
        Ok(self
            .completions
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    fn put_completion(&mut self, completion: UserModuleCompletion) -> StoreResult<()> {
        let key = (completion.user_id.clone(), completion.module_code.clone());
        self.completions.insert(key, completion);
        Ok(())
    }
}

impl UserDirectory for MemoryStore {
    fn user(&self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.get(user_id).cloned())
    }

    fn add_user(&mut self, user: User) -> StoreResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(StoreError::Conflict {
                kind: "user",
                id: user.id,
            });
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn remove_user(&mut self, user_id: &str) -> StoreResult<bool> {
        if self.users.remove(user_id).is_none() {
            return Ok(false);
        }
        for key in Self::user_keys(&self.interests, user_id) {
            self.interests.remove(&key);
        }
        for key in Self::user_keys(&self.completions, user_id) {
            self.completions.remove(&key);
        }
        Ok(true)
    }
}
