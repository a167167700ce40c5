//! Glue record command handlers.

use porkbun_api::{CancellationToken, PorkbunClient};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, GlueArgs, GlueCommand};
use crate::error::{CliError, is_not_found};
use crate::output;

use super::util;

#[derive(Serialize)]
struct GlueHost {
    host: String,
    ips: Vec<String>,
}

#[derive(Tabled)]
struct GlueRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Addresses")]
    ips: String,
}

impl From<&GlueHost> for GlueRow {
    fn from(g: &GlueHost) -> Self {
        Self {
            host: g.host.clone(),
            ips: g.ips.join(", "),
        }
    }
}

pub async fn handle(
    client: &PorkbunClient,
    args: GlueArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        GlueCommand::List { domain } => {
            let glue = client
                .list_glue_records(&domain, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            let hosts: Vec<GlueHost> = glue
                .into_iter()
                .map(|(host, ips)| GlueHost { host, ips })
                .collect();
            let out = output::render_list(
                &global.output,
                &hosts,
                |g| GlueRow::from(g),
                |g| g.host.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GlueCommand::Add { domain, host, ips } => {
            client
                .add_glue_record(&domain, &host, &ips, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            output::print_status(&format!("Glue host {host}.{domain} created"), global.quiet);
            Ok(())
        }

        GlueCommand::Delete {
            domain,
            host,
            ignore_missing,
        } => {
            if !util::confirm(
                &format!("Delete glue host {host}.{domain}?"),
                "glue delete",
                global.yes,
            )? {
                return Ok(());
            }
            let deleted = util::tolerate_missing(
                client.delete_glue_record(&domain, &host, cancel).await,
                ignore_missing,
            )
            .map_err(|e| {
                CliError::for_resource(e, "glue host", &host, &format!("glue list {domain}"))
            })?;
            let verb = if deleted { "deleted" } else { "already gone" };
            output::print_status(&format!("Glue host {host}.{domain} {verb}"), global.quiet);
            Ok(())
        }

        GlueCommand::Replace { domain, host, ips } => {
            client
                .replace_glue_record(&domain, &host, &ips, is_not_found, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            output::print_status(
                &format!("Glue host {host}.{domain} now points at {}", ips.join(", ")),
                global.quiet,
            );
            Ok(())
        }
    }
}
