//! CLI command handlers for `studypath`.
//!
//! Each subcommand is implemented in its own submodule. Handlers that touch
//! stored data load the JSON snapshot named by `paths.data_file` and write it
//! back after a successful change.

pub mod config;
pub mod import;
pub mod interests;
pub mod progress;
pub mod recommend;
pub mod user;

use std::path::Path;
use studypath::config::Config;
use studypath::core::store::MemoryStore;
use studypath::{debug, error};

/// Print an error and exit with status 1
pub fn fail(message: &str) -> ! {
    error!("{message}");
    eprintln!("✗ {message}");
    std::process::exit(1);
}

/// Load the data file named in the config, or exit
pub fn open_store(config: &Config) -> MemoryStore {
    let path = Path::new(&config.paths.data_file);
    debug!("Opening data file {}", path.display());
    MemoryStore::open(path)
        .unwrap_or_else(|e| fail(&format!("Failed to open {}: {e}", path.display())))
}

/// Write the store back to the data file, or exit
pub fn save_store(store: &MemoryStore, config: &Config) {
    let path = Path::new(&config.paths.data_file);
    if let Err(e) = store.save(path) {
        fail(&format!("Failed to save {}: {e}", path.display()));
    }
    debug!("Saved data file {}", path.display());
}
