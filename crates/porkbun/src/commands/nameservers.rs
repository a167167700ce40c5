//! Nameserver command handlers.

use porkbun_api::{CancellationToken, DEFAULT_NAMESERVERS, PorkbunClient};

use crate::cli::{GlobalOpts, NameserversArgs, NameserversCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &PorkbunClient,
    args: NameserversArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        NameserversCommand::Get { domain } => {
            let ns = client
                .get_nameservers(&domain, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            let out = output::render_single(
                &global.output,
                &ns,
                |ns| ns.join("\n"),
                |ns| ns.join("\n"),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NameserversCommand::Set {
            domain,
            nameservers,
        } => {
            client
                .update_nameservers(&domain, &nameservers, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            output::print_status(
                &format!("Nameservers for {domain} set to {}", nameservers.join(", ")),
                global.quiet,
            );
            Ok(())
        }

        NameserversCommand::Reset { domain } => {
            if !util::confirm(
                &format!("Reset {domain} to {}?", DEFAULT_NAMESERVERS.join(", ")),
                "nameservers reset",
                global.yes,
            )? {
                return Ok(());
            }
            client
                .reset_nameservers(&domain, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            output::print_status(
                &format!("Nameservers for {domain} reset to Porkbun defaults"),
                global.quiet,
            );
            Ok(())
        }
    }
}
