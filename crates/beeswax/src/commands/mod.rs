//! Command dispatch: bridges CLI args -> session calls -> output formatting.

pub mod call;
pub mod config_cmd;
pub mod credentials;
pub mod login;

use dialoguer::Input;
use secrecy::SecretString;

use crate::error::CliError;

/// Prompt for a login email on the terminal.
pub(crate) fn prompt_username() -> Result<String, CliError> {
    let username: String = Input::new()
        .with_prompt("Beeswax username (email)")
        .interact_text()
        .map_err(CliError::prompt)?;
    non_empty("username", username)
}

/// Prompt for a password without echo.
pub(crate) fn prompt_password() -> Result<SecretString, CliError> {
    let password = rpassword::prompt_password("Beeswax password: ").map_err(CliError::prompt)?;
    non_empty("password", password).map(SecretString::from)
}

pub(crate) fn non_empty(field: &str, value: String) -> Result<String, CliError> {
    if value.trim().is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(value)
}
