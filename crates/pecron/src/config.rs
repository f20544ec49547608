//! Credential and connection resolution.
//!
//! Region, email, and password resolve flag → env var (wired through
//! clap's `env` attributes) → interactive prompt. Nothing is read from or
//! written to disk; the password lives in a `SecretString` until login.

use std::io::IsTerminal;
use std::str::FromStr;
use std::time::Duration;

use pecron_api::{PecronClient, Region, TransportConfig};
use secrecy::SecretString;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Parse the region flag/env value.
pub fn resolve_region(global: &GlobalOpts) -> Result<Region, CliError> {
    Region::from_str(&global.region).map_err(|_| CliError::Validation {
        field: "region".into(),
        reason: format!("'{}' is not one of CN, EU, US", global.region),
    })
}

/// Resolve account credentials, prompting only on an interactive terminal.
pub fn resolve_credentials(global: &GlobalOpts) -> Result<(String, SecretString), CliError> {
    let email = match global.email.as_deref() {
        Some(email) if !email.is_empty() => email.to_owned(),
        _ => prompt_email()?,
    };
    let password = match global.password.as_deref() {
        Some(password) if !password.is_empty() => SecretString::from(password.to_owned()),
        _ => prompt_password()?,
    };
    Ok((email, password))
}

/// Build an unauthenticated client from the global flags.
pub fn build_client(global: &GlobalOpts) -> Result<PecronClient, CliError> {
    let region = resolve_region(global)?;
    let transport = TransportConfig {
        timeout: Duration::from_secs(global.timeout),
    };
    PecronClient::with_transport(region, &transport).map_err(CliError::from)
}

fn missing(name: &str, flag: &str, env: &str) -> CliError {
    CliError::MissingCredential {
        name: name.to_owned(),
        flag: flag.to_owned(),
        env: env.to_owned(),
    }
}

fn prompt_email() -> Result<String, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(missing("email", "email", "PECRON_EMAIL"));
    }
    let email: String = dialoguer::Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    let email = email.trim().to_owned();
    if email.is_empty() {
        return Err(missing("email", "email", "PECRON_EMAIL"));
    }
    Ok(email)
}

fn prompt_password() -> Result<SecretString, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(missing("password", "password", "PECRON_PASSWORD"));
    }
    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        return Err(missing("password", "password", "PECRON_PASSWORD"));
    }
    Ok(SecretString::from(password))
}
