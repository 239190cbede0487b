//! Interests command handler

use super::{fail, open_store, save_store};
use crate::args::InterestsSubcommand;
use studypath::config::Config;
use studypath::core::interests::{
    replace_interests, set_interest, titled_interests, unset_interest,
};
use studypath::warn;

/// Dispatch interests subcommands
pub fn run(subcommand: InterestsSubcommand, config: &Config) {
    let mut store = open_store(config);
    match subcommand {
        InterestsSubcommand::Set { user, entries } => {
            let update = replace_interests(&mut store, &user, &entries)
                .unwrap_or_else(|e| fail(&e.to_string()));
            save_store(&store, config);
            for skipped in &update.skipped {
                warn!("Unknown career '{skipped}' skipped");
            }
            println!("✓ Stored {} interests for {user}", update.applied);
        }
        InterestsSubcommand::Add { user, entry } => {
            if let Err(e) = set_interest(&mut store, &user, &entry) {
                fail(&e.to_string());
            }
            save_store(&store, config);
            println!(
                "✓ {user}: {} = {}{}",
                entry.career_id,
                entry.interest_level,
                if entry.is_primary { " (primary)" } else { "" }
            );
        }
        InterestsSubcommand::Remove { user, career } => {
            if let Err(e) = unset_interest(&mut store, &user, &career) {
                fail(&e.to_string());
            }
            save_store(&store, config);
            println!("✓ Removed {career} from {user}");
        }
        InterestsSubcommand::Show { user } => {
            let interests =
                titled_interests(&store, &user).unwrap_or_else(|e| fail(&e.to_string()));
            if interests.is_empty() {
                println!("{user} has no career interests");
                return;
            }
            for (interest, title) in interests {
                println!(
                    "{:>3}  {title}{}",
                    interest.interest_level,
                    if interest.is_primary { " *" } else { "" }
                );
            }
        }
    }
}
