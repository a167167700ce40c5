//! Domain listing command handler.

use porkbun_api::{CancellationToken, DomainListing, PorkbunClient};
use tabled::Tabled;

use crate::cli::{DomainsArgs, DomainsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Auto-renew")]
    auto_renew: &'static str,
    #[tabled(rename = "Lock")]
    security_lock: &'static str,
    #[tabled(rename = "WHOIS privacy")]
    whois_privacy: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl From<&DomainListing> for DomainRow {
    fn from(d: &DomainListing) -> Self {
        Self {
            domain: d.domain.clone(),
            status: d.status.clone(),
            expires: d.expire_date.clone(),
            auto_renew: yes_no(d.auto_renew),
            security_lock: yes_no(d.security_lock),
            whois_privacy: yes_no(d.whois_privacy),
        }
    }
}

pub async fn handle(
    client: &PorkbunClient,
    args: DomainsArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        DomainsCommand::List => {
            let domains = client.list_domains(cancel).await?;
            let out = output::render_list(
                &global.output,
                &domains,
                |d| DomainRow::from(d),
                |d| d.domain.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
