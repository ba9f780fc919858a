//! Credentials subcommand handlers.

use beeswax_config::KeyringStore;
use secrecy::SecretString;
use serde_json::json;

use crate::cli::{CredentialsArgs, CredentialsCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::{non_empty, prompt_password, prompt_username};

pub fn handle(args: CredentialsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let format = config::output_format(global, &cfg)?;
    let store = KeyringStore::default();

    match args.command {
        CredentialsCommand::Set { username, password } => {
            let username = match username.or_else(|| global.username.clone()) {
                Some(u) => non_empty("username", u)?,
                None => prompt_username()?,
            };
            let password = match password {
                Some(p) => SecretString::from(non_empty("password", p)?),
                None => prompt_password()?,
            };
            store.save(&username, &password)?;
            if !global.quiet {
                eprintln!("Stored credentials for {username} (OS user {})", store.user());
            }
            Ok(())
        }

        CredentialsCommand::Show => {
            let stored = store.load()?;
            let view = json!({
                "os_user": store.user(),
                "username": stored.username,
                "password_stored": stored.password.is_some(),
            });
            output::print_output(&output::render(format, &view)?, global.quiet);
            Ok(())
        }

        CredentialsCommand::Clear => {
            store.clear()?;
            if !global.quiet {
                eprintln!("Removed stored credentials for OS user {}", store.user());
            }
            Ok(())
        }
    }
}
