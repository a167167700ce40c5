//! DNS record command handlers.

use porkbun_api::{CancellationToken, DnsRecord, PorkbunClient, RecordInput, relative_record_name};
use tabled::Tabled;

use crate::cli::{GlobalOpts, RecordFields, RecordsArgs, RecordsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "TTL")]
    ttl: String,
    #[tabled(rename = "Prio")]
    prio: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl RecordRow {
    fn new(record: &DnsRecord, domain: &str) -> Self {
        let label = relative_record_name(&record.name, domain);
        Self {
            id: record.id.clone(),
            name: if label.is_empty() { "@".into() } else { label },
            record_type: record.record_type.clone(),
            content: record.content.clone(),
            ttl: record.ttl.clone(),
            prio: util::or_dash(record.prio.as_deref()),
            notes: util::or_dash(record.notes.as_deref()),
        }
    }
}

fn detail(record: &DnsRecord, domain: &str) -> String {
    let label = relative_record_name(&record.name, domain);
    let mut lines = vec![
        format!("ID:       {}", record.id),
        format!("Name:     {}", record.name),
        format!("Label:    {}", if label.is_empty() { "@" } else { &label }),
        format!("Type:     {}", record.record_type),
        format!("Content:  {}", record.content),
        format!("TTL:      {}", record.ttl),
    ];
    if let Some(prio) = record.prio.as_deref().filter(|p| !p.is_empty()) {
        lines.push(format!("Priority: {prio}"));
    }
    if let Some(notes) = record.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("Notes:    {notes}"));
    }
    lines.join("\n")
}

fn to_input(fields: RecordFields) -> RecordInput {
    let mut input = RecordInput::new(fields.r#type, fields.content).with_name(fields.name);
    if let Some(ttl) = fields.ttl {
        input = input.with_ttl(ttl);
    }
    if let Some(prio) = fields.prio {
        input = input.with_prio(prio);
    }
    if let Some(notes) = fields.notes {
        input = input.with_notes(notes);
    }
    input
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PorkbunClient,
    args: RecordsArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        RecordsCommand::List { domain, r#type } => {
            let records = client
                .list_records(&domain, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?;
            let records: Vec<DnsRecord> = match r#type {
                Some(t) => records
                    .into_iter()
                    .filter(|r| r.record_type.eq_ignore_ascii_case(&t))
                    .collect(),
                None => records,
            };
            let out = output::render_list(
                &global.output,
                &records,
                |r| RecordRow::new(r, &domain),
                |r| r.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecordsCommand::Get { domain, id } => {
            let record = client
                .find_record(&domain, &id, cancel)
                .await
                .map_err(|e| CliError::for_resource(e, "domain", &domain, "domains list"))?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "record".into(),
                    identifier: id.clone(),
                    list_command: format!("records list {domain}"),
                })?;
            let out = output::render_single(
                &global.output,
                &record,
                |r| detail(r, &domain),
                |r| r.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecordsCommand::Create { domain, record } => {
            let id = client
                .create_record(&domain, &to_input(record), cancel)
                .await?;
            output::print_output(&id, global.quiet);
            Ok(())
        }

        RecordsCommand::Edit { domain, id, record } => {
            client
                .edit_record(&domain, &id, &to_input(record), cancel)
                .await
                .map_err(|e| {
                    CliError::for_resource(e, "record", &id, &format!("records list {domain}"))
                })?;
            output::print_status(&format!("Record {id} updated"), global.quiet);
            Ok(())
        }

        RecordsCommand::Delete {
            domain,
            id,
            ignore_missing,
        } => {
            if !util::confirm(
                &format!("Delete record {id} from {domain}?"),
                "records delete",
                global.yes,
            )? {
                return Ok(());
            }
            let deleted = util::tolerate_missing(
                client.delete_record(&domain, &id, cancel).await,
                ignore_missing,
            )
            .map_err(|e| {
                CliError::for_resource(e, "record", &id, &format!("records list {domain}"))
            })?;
            if deleted {
                output::print_status(&format!("Record {id} deleted"), global.quiet);
            } else {
                output::print_status(&format!("Record {id} already gone"), global.quiet);
            }
            Ok(())
        }
    }
}
