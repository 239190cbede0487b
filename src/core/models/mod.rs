//! Data models for `studypath`

pub mod career;
pub mod module;
pub mod relevance;
pub mod user;

pub use career::{CareerPath, SalaryBand};
pub use module::{Module, ModuleCategory};
pub use relevance::ModuleCareerRelevance;
pub use user::{CompletionStatus, User, UserCareerInterest, UserModuleCompletion};
