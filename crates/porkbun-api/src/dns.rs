// DNS record endpoints
//
// `dns/create`, `dns/retrieve`, `dns/edit` and `dns/delete`, all
// domain-scoped. Retrieval is read-through cached per domain; every
// successful mutation invalidates the domain.

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::client::PorkbunClient;
use crate::codec;
use crate::error::Error;
use crate::models::{CreateRecordResponse, DnsRecord, RecordInput, RetrieveRecordsResponse};

impl PorkbunClient {
    /// Create a record and return its server-assigned id.
    ///
    /// `POST dns/create/{domain}`
    pub async fn create_record(
        &self,
        domain: &str,
        record: &RecordInput,
        cancel: &CancellationToken,
    ) -> Result<String, Error> {
        debug!(domain, record_type = %record.record_type, "creating record");
        let body = codec::to_body(record)?;
        let response: CreateRecordResponse = self
            .call(&["dns", "create", domain], Some(body), cancel)
            .await?;
        self.cache().invalidate_domain(domain);
        Ok(response.id)
    }

    /// All records of a domain, unfiltered.
    ///
    /// `POST dns/retrieve/{domain}` on a cache miss.
    pub async fn list_records(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<DnsRecord>, Error> {
        if let Some(records) = self.cache().records(domain) {
            trace!(domain, "records cache hit");
            return Ok(records);
        }

        let response: RetrieveRecordsResponse = self
            .call(&["dns", "retrieve", domain], None, cancel)
            .await?;
        let records = response.records.unwrap_or_default();
        self.cache().put_records(domain, records.clone());
        Ok(records)
    }

    /// Look up one record by id through the cached listing.
    pub async fn find_record(
        &self,
        domain: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<DnsRecord>, Error> {
        let records = self.list_records(domain, cancel).await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    /// Replace a record's name, type, content, TTL, priority and notes.
    ///
    /// `POST dns/edit/{domain}/{id}`. See [`RecordInput::edit_payload`]
    /// for when `prio` is sent.
    pub async fn edit_record(
        &self,
        domain: &str,
        id: &str,
        record: &RecordInput,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, id, "editing record");
        let body = Value::Object(record.edit_payload());
        self.call_void(&["dns", "edit", domain, id], Some(body), cancel)
            .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }

    /// Delete a record by id.
    ///
    /// `POST dns/delete/{domain}/{id}`. A missing record comes back as an
    /// [`Error::Api`]; whether that is tolerable is the caller's call.
    pub async fn delete_record(
        &self,
        domain: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, id, "deleting record");
        self.call_void(&["dns", "delete", domain, id], None, cancel)
            .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }
}
