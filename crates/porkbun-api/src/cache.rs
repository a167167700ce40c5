// Per-client response cache
//
// Write-through-invalidate with no TTL: an entry is either absent (fetch
// on next read) or present (authoritative until the next successful
// mutation on its domain). One mutex covers every namespace and is held
// only for the map access itself, never across a network call.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::models::{DnsRecord, DnssecRecord, DomainListing, TldPricing};

/// Glue records of one domain: bare host label -> combined v4/v6 addresses.
pub type GlueRecords = BTreeMap<String, Vec<String>>;

/// TLD -> pricing.
pub type PricingTable = BTreeMap<String, TldPricing>;

#[derive(Debug, Default)]
struct CacheState {
    records: HashMap<String, Vec<DnsRecord>>,
    glue: HashMap<String, GlueRecords>,
    dnssec: HashMap<String, Vec<DnssecRecord>>,
    pricing: Option<PricingTable>,
    domains: Option<Vec<DomainListing>>,
}

/// The cache owned by one [`PorkbunClient`](crate::PorkbunClient).
///
/// Domain-keyed namespaces (records, glue, DNSSEC) are dropped together
/// by [`invalidate_domain`](Self::invalidate_domain). Pricing and the
/// domain listing are global and, once filled, never invalidated.
#[derive(Debug, Default)]
pub struct ResponseCache {
    state: Mutex<CacheState>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while the lock was held cannot leave a map half-written,
    /// so a poisoned lock is simply taken over.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── DNS records ──────────────────────────────────────────────────

    pub fn records(&self, domain: &str) -> Option<Vec<DnsRecord>> {
        self.lock().records.get(domain).cloned()
    }

    pub fn put_records(&self, domain: &str, records: Vec<DnsRecord>) {
        self.lock().records.insert(domain.to_owned(), records);
    }

    // ── Glue ─────────────────────────────────────────────────────────

    pub fn glue_records(&self, domain: &str) -> Option<GlueRecords> {
        self.lock().glue.get(domain).cloned()
    }

    pub fn put_glue_records(&self, domain: &str, glue: GlueRecords) {
        self.lock().glue.insert(domain.to_owned(), glue);
    }

    // ── DNSSEC ───────────────────────────────────────────────────────

    pub fn dnssec_records(&self, domain: &str) -> Option<Vec<DnssecRecord>> {
        self.lock().dnssec.get(domain).cloned()
    }

    pub fn put_dnssec_records(&self, domain: &str, records: Vec<DnssecRecord>) {
        self.lock().dnssec.insert(domain.to_owned(), records);
    }

    // ── Global ───────────────────────────────────────────────────────

    pub fn pricing(&self) -> Option<PricingTable> {
        self.lock().pricing.clone()
    }

    pub fn put_pricing(&self, pricing: PricingTable) {
        self.lock().pricing = Some(pricing);
    }

    pub fn domains(&self) -> Option<Vec<DomainListing>> {
        self.lock().domains.clone()
    }

    pub fn put_domains(&self, domains: Vec<DomainListing>) {
        self.lock().domains = Some(domains);
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Drop every domain-scoped entry for `domain`: records, glue and DNSSEC.
    pub fn invalidate_domain(&self, domain: &str) {
        trace!(domain, "invalidating domain cache");
        let mut state = self.lock();
        state.records.remove(domain);
        state.glue.remove(domain);
        state.dnssec.remove(domain);
    }

    /// `true` if any domain-scoped namespace holds an entry for `domain`.
    pub fn has_domain(&self, domain: &str) -> bool {
        let state = self.lock();
        state.records.contains_key(domain)
            || state.glue.contains_key(domain)
            || state.dnssec.contains_key(domain)
    }
}
