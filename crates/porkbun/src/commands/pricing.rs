//! TLD pricing command handler.

use porkbun_api::{CancellationToken, PorkbunClient, TldPricing};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, PricingArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct TldPrice {
    tld: String,
    #[serde(flatten)]
    pricing: TldPricing,
}

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "TLD")]
    tld: String,
    #[tabled(rename = "Registration")]
    registration: String,
    #[tabled(rename = "Renewal")]
    renewal: String,
    #[tabled(rename = "Transfer")]
    transfer: String,
}

impl From<&TldPrice> for PriceRow {
    fn from(p: &TldPrice) -> Self {
        Self {
            tld: p.tld.clone(),
            registration: p.pricing.registration.clone(),
            renewal: p.pricing.renewal.clone(),
            transfer: p.pricing.transfer.clone(),
        }
    }
}

pub async fn handle(
    client: &PorkbunClient,
    args: PricingArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let table = client.get_pricing(cancel).await?;
    let wanted: Vec<String> = args
        .tld
        .iter()
        .map(|t| t.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let prices: Vec<TldPrice> = table
        .into_iter()
        .filter(|(tld, _)| wanted.is_empty() || wanted.contains(tld))
        .map(|(tld, pricing)| TldPrice { tld, pricing })
        .collect();

    if prices.is_empty() && !wanted.is_empty() {
        return Err(CliError::NotFound {
            resource_type: "TLD".into(),
            identifier: wanted.join(","),
            list_command: "pricing".into(),
        });
    }

    let out = output::render_list(
        &global.output,
        &prices,
        |p| PriceRow::from(p),
        |p| p.tld.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
