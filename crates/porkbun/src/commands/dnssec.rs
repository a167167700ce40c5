//! DNSSEC (DS record) command handlers.

use porkbun_api::{CancellationToken, DnssecRecord, PorkbunClient};
use tabled::Tabled;

use crate::cli::{DnssecArgs, DnssecCommand, DsFields, GlobalOpts, OldDsFields};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct DsRow {
    #[tabled(rename = "Key Tag")]
    key_tag: String,
    #[tabled(rename = "Algorithm")]
    algorithm: String,
    #[tabled(rename = "Digest Type")]
    digest_type: String,
    #[tabled(rename = "Digest")]
    digest: String,
}

impl From<&DnssecRecord> for DsRow {
    fn from(r: &DnssecRecord) -> Self {
        Self {
            key_tag: r.key_tag.clone(),
            algorithm: r.algorithm.clone(),
            digest_type: r.digest_type.clone(),
            digest: r.digest.clone(),
        }
    }
}

impl From<DsFields> for DnssecRecord {
    fn from(f: DsFields) -> Self {
        Self {
            algorithm: f.algorithm,
            digest_type: f.digest_type,
            key_tag: f.key_tag,
            digest: f.digest,
        }
    }
}

impl From<OldDsFields> for DnssecRecord {
    fn from(f: OldDsFields) -> Self {
        Self {
            algorithm: f.old_algorithm,
            digest_type: f.old_digest_type,
            key_tag: f.old_key_tag,
            digest: f.old_digest,
        }
    }
}

pub async fn handle(
    client: &PorkbunClient,
    args: DnssecArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        DnssecCommand::List { domain } => {
            let records = client
                .list_dnssec_records(&domain, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            let out = output::render_list(
                &global.output,
                &records,
                |r| DsRow::from(r),
                |r| r.key_tag.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DnssecCommand::Add { domain, record } => {
            let record = DnssecRecord::from(record);
            client
                .add_dnssec_record(&domain, &record, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            output::print_status(
                &format!("DS record {} published for {domain}", record.key_tag),
                global.quiet,
            );
            Ok(())
        }

        DnssecCommand::Delete {
            domain,
            record,
            ignore_missing,
        } => {
            let record = DnssecRecord::from(record);
            if !util::confirm(
                &format!("Withdraw DS record {} from {domain}?", record.key_tag),
                "dnssec delete",
                global.yes,
            )? {
                return Ok(());
            }
            let deleted = util::tolerate_missing(
                client.delete_dnssec_record(&domain, &record, cancel).await,
                ignore_missing,
            )
            .map_err(|e| {
                CliError::for_resource(
                    e,
                    "DS record",
                    &record.key_tag,
                    &format!("dnssec list {domain}"),
                )
            })?;
            let verb = if deleted { "withdrawn" } else { "already gone" };
            output::print_status(&format!("DS record {} {verb}", record.key_tag), global.quiet);
            Ok(())
        }

        DnssecCommand::Replace { domain, old, new } => {
            let old = DnssecRecord::from(old);
            let new = DnssecRecord::from(new);
            if !client.find_dnssec_record(&domain, &old, cancel).await? {
                return Err(CliError::NotFound {
                    resource_type: "DS record".into(),
                    identifier: old.key_tag,
                    list_command: format!("dnssec list {domain}"),
                });
            }
            client
                .replace_dnssec_record(&domain, &old, &new, cancel)
                .await?;
            output::print_status(
                &format!("DS record {} replaced by {}", old.key_tag, new.key_tag),
                global.quiet,
            );
            Ok(())
        }
    }
}
