// Domain endpoints: nameservers, glue records, account listing
//
// Nameservers are never cached; every read is live. Glue records are
// cached per domain after flattening. The account listing is cached
// globally and never invalidated.

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::cache::GlueRecords;
use crate::client::PorkbunClient;
use crate::error::Error;
use crate::models::{
    DomainListing, GlueRecordsResponse, ListAllResponse, NameserversResponse, flatten_glue_hosts,
};

/// Porkbun's own nameservers, assigned to newly registered domains.
pub const DEFAULT_NAMESERVERS: [&str; 4] = [
    "curia.porkbun.com",
    "livia.porkbun.com",
    "pliny.porkbun.com",
    "salvia.porkbun.com",
];

impl PorkbunClient {
    // ── Nameservers ──────────────────────────────────────────────────

    /// Authoritative nameservers registered for a domain.
    ///
    /// `POST domain/getNs/{domain}`, always live.
    pub async fn get_nameservers(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, Error> {
        let response: NameserversResponse = self
            .call(&["domain", "getNs", domain], None, cancel)
            .await?;
        Ok(response.ns.unwrap_or_default())
    }

    /// Replace the registered nameservers.
    ///
    /// `POST domain/updateNs/{domain}` with `{"ns": [...]}`
    pub async fn update_nameservers(
        &self,
        domain: &str,
        nameservers: &[String],
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, count = nameservers.len(), "updating nameservers");
        self.call_void(
            &["domain", "updateNs", domain],
            Some(json!({ "ns": nameservers })),
            cancel,
        )
        .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }

    /// Point the domain back at [`DEFAULT_NAMESERVERS`].
    pub async fn reset_nameservers(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let defaults: Vec<String> = DEFAULT_NAMESERVERS
            .iter()
            .map(|&ns| ns.to_owned())
            .collect();
        self.update_nameservers(domain, &defaults, cancel).await
    }

    // ── Glue records ─────────────────────────────────────────────────

    /// Glue hosts of a domain as `host label -> [v4..., v6...]`.
    ///
    /// `POST domain/getGlue/{domain}` on a cache miss. Malformed host
    /// entries in the response are skipped, not reported.
    pub async fn list_glue_records(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<GlueRecords, Error> {
        if let Some(glue) = self.cache().glue_records(domain) {
            trace!(domain, "glue cache hit");
            return Ok(glue);
        }

        let response: GlueRecordsResponse = self
            .call(&["domain", "getGlue", domain], None, cancel)
            .await?;
        let glue = flatten_glue_hosts(domain, &response.hosts.unwrap_or_default());
        self.cache().put_glue_records(domain, glue.clone());
        Ok(glue)
    }

    /// Create a glue host (`host` is the bare label, e.g. `ns1`).
    ///
    /// `POST domain/createGlue/{domain}/{host}` with `{"ips": [...]}`
    pub async fn add_glue_record(
        &self,
        domain: &str,
        host: &str,
        ips: &[String],
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, host, "adding glue record");
        self.call_void(
            &["domain", "createGlue", domain, host],
            Some(json!({ "ips": ips })),
            cancel,
        )
        .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }

    /// `POST domain/deleteGlue/{domain}/{host}`
    pub async fn delete_glue_record(
        &self,
        domain: &str,
        host: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        debug!(domain, host, "deleting glue record");
        self.call_void(&["domain", "deleteGlue", domain, host], None, cancel)
            .await?;
        self.cache().invalidate_domain(domain);
        Ok(())
    }

    /// Swap a glue host's addresses: delete `host`, then add it with `ips`.
    ///
    /// There is no edit endpoint for glue. A delete error for which
    /// `is_missing` returns `true` is skipped and the add still runs;
    /// any other delete error is returned before adding. Not atomic.
    pub async fn replace_glue_record(
        &self,
        domain: &str,
        host: &str,
        ips: &[String],
        is_missing: impl Fn(&Error) -> bool,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        match self.delete_glue_record(domain, host, cancel).await {
            Ok(()) => {}
            Err(e) if is_missing(&e) => trace!(domain, host, "glue host absent before replace"),
            Err(e) => return Err(e),
        }
        self.add_glue_record(domain, host, ips, cancel).await
    }

    // ── Account listing ──────────────────────────────────────────────

    /// Every domain in the account.
    ///
    /// `POST domain/listAll` once per client; later calls hit the cache.
    pub async fn list_domains(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<DomainListing>, Error> {
        if let Some(domains) = self.cache().domains() {
            trace!("domain listing cache hit");
            return Ok(domains);
        }

        let response: ListAllResponse = self.call(&["domain", "listAll"], None, cancel).await?;
        let domains = response.domains.unwrap_or_default();
        self.cache().put_domains(domains.clone());
        Ok(domains)
    }
}
