//! User command handler

use super::{fail, open_store, save_store};
use crate::args::UserSubcommand;
use studypath::config::Config;
use studypath::core::models::User;
use studypath::core::store::UserDirectory;

/// Dispatch user subcommands
pub fn run(subcommand: UserSubcommand, config: &Config) {
    let mut store = open_store(config);
    match subcommand {
        UserSubcommand::Add { user, regulation } => {
            if let Err(e) = store.add_user(User::new(user.clone(), regulation)) {
                fail(&e.to_string());
            }
            save_store(&store, config);
            println!("✓ Added user {user}");
        }
        UserSubcommand::Remove { user } => match store.remove_user(&user) {
            Ok(true) => {
                save_store(&store, config);
                println!("✓ Removed user {user} with their interests and progress");
            }
            Ok(false) => fail(&format!("user not found: '{user}'")),
            Err(e) => fail(&e.to_string()),
        },
        UserSubcommand::List => {
            let users = store.users();
            if users.is_empty() {
                println!("No users registered");
            }
            for user in users {
                match user.regulation {
                    Some(regulation) => println!("{} ({regulation})", user.id),
                    None => println!("{}", user.id),
                }
            }
        }
    }
}
