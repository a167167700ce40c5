//! Ping command handler.

use porkbun_api::{CancellationToken, PorkbunClient};
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct PingResult {
    your_ip: String,
}

pub async fn handle(
    client: &PorkbunClient,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let your_ip = client.ping(cancel).await?;
    let result = PingResult { your_ip };
    let out = output::render_single(
        &global.output,
        &result,
        |r| format!("Credentials OK. API sees you at {}", r.your_ip),
        |r| r.your_ip.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
