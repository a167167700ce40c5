//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod dnssec;
pub mod domains;
pub mod glue;
pub mod nameservers;
pub mod ping;
pub mod pricing;
pub mod records;
pub mod util;

use porkbun_api::{CancellationToken, PorkbunClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &PorkbunClient,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match cmd {
        Command::Ping => ping::handle(client, global, cancel).await,
        Command::Records(args) => records::handle(client, args, global, cancel).await,
        Command::Nameservers(args) => nameservers::handle(client, args, global, cancel).await,
        Command::Glue(args) => glue::handle(client, args, global, cancel).await,
        Command::Dnssec(args) => dnssec::handle(client, args, global, cancel).await,
        Command::Pricing(args) => pricing::handle(client, args, global, cancel).await,
        Command::Domains(args) => domains::handle(client, args, global, cancel).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
