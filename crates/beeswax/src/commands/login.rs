//! `beeswax login`: authenticate and print the session payload.

use std::sync::Arc;

use beeswax_api::{CredentialProvider, Session};
use beeswax_config::CredentialChain;

use crate::cli::{GlobalOpts, LoginArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{prompt_password, prompt_username};

pub async fn handle(
    args: LoginArgs,
    session: &Arc<Session>,
    chain: &CredentialChain,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let found = chain.lookup()?;
    let username = match found.username {
        Some(u) => u,
        None => prompt_username()?,
    };
    let password = match found.password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let payload = session
        .authenticate(Some(&username), Some(&password))
        .await
        .map_err(|e| CliError::from(e).into_auth_failure())?;

    if args.save {
        chain.store(&username, &password)?;
        if !global.quiet {
            eprintln!("Saved credentials for {username}");
        }
    }

    output::print_output(&output::render(format, &payload)?, global.quiet);
    Ok(())
}
