//! Command dispatch: connect, fetch, format.

pub mod control;
pub mod devices;
pub mod raw;
pub mod schema;
pub mod status;
pub mod util;

use pecron_api::PecronClient;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Build a client and log in with resolved credentials.
pub async fn connect(global: &GlobalOpts) -> Result<PecronClient, CliError> {
    let (email, password) = config::resolve_credentials(global)?;
    let client = config::build_client(global)?;
    tracing::debug!(region = %client.region(), "authenticating");
    client.login(&email, &password).await?;
    Ok(client)
}

/// Dispatch a cloud-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices => devices::handle(global).await,
        Command::Status => status::handle(global).await,
        Command::Raw => raw::handle(global).await,
        Command::Schema => schema::handle(global).await,
        Command::Set(args) => control::handle(args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
