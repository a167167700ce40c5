// DNSSEC delegation-signer endpoints
//
// DS records have no server id. The (algorithm, digest type, key tag,
// digest) tuple is the key, so deletion sends the whole record back.

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::client::PorkbunClient;
use crate::codec;
use crate::error::Error;
use crate::models::{DnssecRecord, DnssecRecordsResponse};

impl PorkbunClient {
    /// DS records published for a domain.
    ///
    /// `POST dns/getDnssec/{domain}` on a cache miss.
    pub async fn list_dnssec_records(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<DnssecRecord>, Error> {
        if let Some(records) = self.cache().dnssec_records(domain) {
            trace!(domain, "dnssec cache hit");
            return Ok(records);
        }

        let response: DnssecRecordsResponse = self
            .call(&["dns", "getDnssec", domain], None, cancel)
            .await?;
        let records = response.ds_records.unwrap_or_default();
        self.cache().put_dnssec_records(domain, records.clone());
        Ok(records)
    }

    /// `true` if a DS record with exactly this tuple is published.
    pub async fn find_dnssec_record(
        &self,
        domain: &str,
        record: &DnssecRecord,
        cancel: &CancellationToken,
    ) -> Result<bool, Error> {
        let records = self.list_dnssec_records(domain, cancel).await?;
        Ok(records.contains(record))
    }

    /// `POST dns/addDnssec/{domain}`
    pub async fn add_dnssec_record(
        &self,
        domain: &str,
        record: &DnssecRecord,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, key_tag = %record.key_tag, "adding DS record");
        let body = codec::to_body(record)?;
        self.call_void(&["dns", "addDnssec", domain], Some(body), cancel)
            .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }

    /// `POST dns/deleteDnssec/{domain}` with the full tuple as the key.
    pub async fn delete_dnssec_record(
        &self,
        domain: &str,
        record: &DnssecRecord,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, key_tag = %record.key_tag, "deleting DS record");
        let body = codec::to_body(record)?;
        self.call_void(&["dns", "deleteDnssec", domain], Some(body), cancel)
            .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }

    /// Swap one DS record for another: delete `old`, then add `new`.
    ///
    /// Not atomic. If the add fails the old record is already gone and the
    /// error from the add is returned.
    pub async fn replace_dnssec_record(
        &self,
        domain: &str,
        old: &DnssecRecord,
        new: &DnssecRecord,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.delete_dnssec_record(domain, old, cancel).await?;
        self.add_dnssec_record(domain, new, cancel).await
    }
}
