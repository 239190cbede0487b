//! Import command handler

use super::{fail, open_store, save_store};
use std::path::Path;
use studypath::config::Config;
use studypath::core::extractor::ExtractionRules;
use studypath::core::importer::{run_import, ImportJob};
use studypath::info;

/// Import module and career files into the data file
pub fn run(
    modules: &Path,
    careers: Option<&Path>,
    regulation: Option<&str>,
    clear: bool,
    config: &Config,
    verbose: bool,
) {
    let keywords = config.keywords_path();
    let rules = ExtractionRules::load(keywords.as_deref())
        .unwrap_or_else(|e| fail(&format!("Failed to load keyword registry: {e}")));
    info!(
        "Keyword registry: {} careers, {} category hints",
        rules.registry.len(),
        rules.category_hints.iter().count()
    );

    let mut store = open_store(config);
    let job = ImportJob {
        modules_file: modules,
        careers_file: careers,
        regulation,
        clear,
    };
    let summary =
        run_import(&mut store, &job, &rules).unwrap_or_else(|e| fail(&e.to_string()));
    save_store(&store, config);

    println!("✓ Imported {} modules", summary.modules_imported);
    println!("✓ Imported {} career paths", summary.careers_imported);
    println!("✓ Wrote {} relevance edges", summary.relevance_edges);
    if verbose {
        println!("  duplicates skipped: {}", summary.duplicates_skipped);
        println!("  invalid records skipped: {}", summary.invalid_skipped);
        println!("  stale edges removed: {}", summary.edges_removed);
        println!(
            "  catalog now holds {} modules and {} edges",
            store.module_count(),
            store.relevance_count()
        );
    }
}
