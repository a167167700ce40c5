// porkbun-api: Async Rust client for the Porkbun registrar JSON API (v3)
//
// Two layers: `codec` turns logical calls into credential-stamped JSON
// bodies and classifies responses (HTTP status, then the `{status}`
// envelope, then the payload); `PorkbunClient` exposes one method per
// remote operation on top of it, with a per-client response cache.

pub mod auth;
pub mod cache;
pub mod client;
pub mod codec;
pub mod error;
pub mod models;
pub mod transport;

mod dns;
mod dnssec;
mod domain;
mod general;

pub use auth::Credentials;
pub use cache::{GlueRecords, PricingTable, ResponseCache};
pub use client::{DEFAULT_BASE_URL, PorkbunClient};
pub use domain::DEFAULT_NAMESERVERS;
pub use error::Error;
pub use models::{
    DnsRecord, DnssecRecord, DomainListing, RecordInput, TldPricing, flatten_glue_hosts,
    normalize_flag, relative_record_name,
};
pub use transport::TransportConfig;

/// Re-exported so callers do not need a direct `tokio-util` dependency.
pub use tokio_util::sync::CancellationToken;
