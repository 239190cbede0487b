//! Progress command handler

use super::{fail, open_store, save_store};
use crate::args::ProgressSubcommand;
use studypath::config::Config;
use studypath::core::progress::{completed_totals, record_status};
use studypath::core::store::CompletionTracker;

/// Dispatch progress subcommands
pub fn run(subcommand: ProgressSubcommand, config: &Config) {
    let mut store = open_store(config);
    match subcommand {
        ProgressSubcommand::Set {
            user,
            module,
            status,
            grade,
        } => {
            let record = record_status(&mut store, &user, &module, status, grade)
                .unwrap_or_else(|e| fail(&e.to_string()));
            save_store(&store, config);
            match record.grade {
                Some(grade) => println!("✓ {user}: {module} {status} ({grade:.1})"),
                None => println!("✓ {user}: {module} {status}"),
            }
        }
        ProgressSubcommand::Show { user } => {
            let completions = store
                .completions(&user)
                .unwrap_or_else(|e| fail(&e.to_string()));
            for c in &completions {
                let grade = c.grade.map(|g| format!(" ({g:.1})")).unwrap_or_default();
                println!("{:<14} {}{grade}", c.module_code, c.status);
            }
            let (modules, credits) =
                completed_totals(&store, &user).unwrap_or_else(|e| fail(&e.to_string()));
            println!("\nCompleted: {modules} modules, {credits} credits");
        }
    }
}
