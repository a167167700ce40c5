// Porkbun API request and response types
//
// Every response is a flat JSON object: the envelope fields (`status`,
// `message`) sit next to the operation-specific payload. Payload structs
// therefore never model the envelope. The API is loose about scalar
// types (ids, TTLs and prices arrive as strings or numbers, flags as
// booleans, strings or 0/1), so those fields go through permissive
// `serde_json::Value` projections below.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Response Envelope ────────────────────────────────────────────────

/// The minimal envelope every response carries.
///
/// ```json
/// { "status": "SUCCESS" | "ERROR", "message": "optional", ... }
/// ```
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Exact, case-sensitive match on `"ERROR"`.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("ERROR")
    }
}

// ── DNS records ──────────────────────────────────────────────────────

/// A DNS record as returned by `dns/retrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Server-assigned, opaque.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Fully-qualified record name (`www.example.com`, or the apex itself).
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ttl: String,
    /// Only meaningful for MX and SRV records.
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub prio: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// Caller-supplied record shape for `dns/create` and `dns/edit`.
///
/// `name` is the subdomain part only (empty for the apex).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub ttl: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub prio: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub notes: Option<String>,
}

impl RecordInput {
    pub fn new(record_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_ttl(mut self, ttl: impl Into<String>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }

    pub fn with_prio(mut self, prio: impl Into<String>) -> Self {
        self.prio = Some(prio.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// `true` for MX and SRV, compared case-insensitively.
    pub fn uses_priority(&self) -> bool {
        matches!(
            self.record_type.to_ascii_uppercase().as_str(),
            "MX" | "SRV"
        )
    }

    /// Body for `dns/edit`.
    ///
    /// `prio` is only sent for MX/SRV records with a non-empty priority;
    /// the server rejects edits that carry one for other types.
    pub fn edit_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("name".into(), Value::String(self.name.clone()));
        payload.insert("type".into(), Value::String(self.record_type.clone()));
        payload.insert("content".into(), Value::String(self.content.clone()));
        if let Some(ttl) = non_blank(self.ttl.as_ref()) {
            payload.insert("ttl".into(), Value::String(ttl.to_owned()));
        }
        if self.uses_priority() {
            if let Some(prio) = non_blank(self.prio.as_ref()) {
                payload.insert("prio".into(), Value::String(prio.to_owned()));
            }
        }
        if let Some(notes) = non_blank(self.notes.as_ref()) {
            payload.insert("notes".into(), Value::String(notes.to_owned()));
        }
        payload
    }
}

/// Response of `dns/create`. The id arrives as a number.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RetrieveRecordsResponse {
    #[serde(default)]
    pub records: Option<Vec<DnsRecord>>,
}

/// Strip `.{domain}` from a fully-qualified record name.
///
/// The apex (`name == domain`) maps to the empty string, matching what
/// [`RecordInput::name`] expects.
pub fn relative_record_name(fqdn: &str, domain: &str) -> String {
    if fqdn == domain {
        return String::new();
    }
    fqdn.strip_suffix(domain)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(fqdn)
        .to_owned()
}

// ── General ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct PingResponse {
    #[serde(rename = "yourIp", default)]
    pub your_ip: String,
}

/// Registry pricing for one TLD.
///
/// Prices stay strings so `"9.68"` is never rounded through a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TldPricing {
    #[serde(default, deserialize_with = "string_or_number")]
    pub registration: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub renewal: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub transfer: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sla: f64,
    #[serde(
        default,
        rename = "renew_grace_day",
        deserialize_with = "lenient_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub grace_period_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PricingResponse {
    #[serde(default)]
    pub pricing: Option<BTreeMap<String, TldPricing>>,
}

// ── Domain ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct NameserversResponse {
    #[serde(default)]
    pub ns: Option<Vec<String>>,
}

/// One entry of `domain/listAll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainListing {
    #[serde(default, deserialize_with = "string_or_number")]
    pub domain: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tld: String,
    #[serde(rename = "createDate", default, deserialize_with = "string_or_number")]
    pub create_date: String,
    #[serde(rename = "expireDate", default, deserialize_with = "string_or_number")]
    pub expire_date: String,
    #[serde(rename = "securityLock", default, deserialize_with = "flag")]
    pub security_lock: bool,
    #[serde(rename = "whoisPrivacy", default, deserialize_with = "flag")]
    pub whois_privacy: bool,
    #[serde(rename = "autoRenew", default, deserialize_with = "flag")]
    pub auto_renew: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListAllResponse {
    #[serde(default)]
    pub domains: Option<Vec<DomainListing>>,
}

/// Normalize a listing flag to `bool`.
///
/// The API mixes `true`, `"true"` and `1` for the same field. Only the
/// boolean `true`, the exact string `"true"` and a number equal to 1 are
/// truthy; `"1"`, `"false"`, other numbers, `null` and absence are not.
pub fn normalize_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| (f - 1.0).abs() < f64::EPSILON),
        _ => false,
    }
}

// ── Glue ─────────────────────────────────────────────────────────────

/// Glue host addresses split by family, as nested in `domain/getGlue`.
#[derive(Debug, Default, Deserialize)]
struct GlueAddresses {
    #[serde(default)]
    v4: Option<Vec<String>>,
    #[serde(default)]
    v6: Option<Vec<String>>,
}

/// Response of `domain/getGlue`. Each host is a mixed-type tuple
/// `["ns1.example.com", {"v4": [...], "v6": [...]}]`, kept as raw JSON
/// until [`flatten_glue_hosts`] projects it.
#[derive(Debug, Deserialize)]
pub(crate) struct GlueRecordsResponse {
    #[serde(default)]
    pub hosts: Option<Vec<Value>>,
}

/// Flatten the `hosts` tuples of `domain/getGlue` into
/// `bare host label -> [v4..., v6...]`.
///
/// An entry is skipped when it is not a two-element array, when its
/// first element is not a string, or when its second element is not an
/// object of address lists. Skipped entries never fail the whole list.
pub fn flatten_glue_hosts(domain: &str, hosts: &[Value]) -> BTreeMap<String, Vec<String>> {
    let suffix = format!(".{domain}");
    let mut flattened = BTreeMap::new();

    for entry in hosts {
        let Some([host, addresses]) = entry.as_array().map(Vec::as_slice) else {
            continue;
        };
        let Some(fqdn) = host.as_str() else {
            continue;
        };
        if !addresses.is_object() {
            continue;
        }
        let Ok(addresses) = GlueAddresses::deserialize(addresses) else {
            continue;
        };

        let label = fqdn.strip_suffix(&suffix).unwrap_or(fqdn).to_owned();
        let mut ips = addresses.v4.unwrap_or_default();
        ips.extend(addresses.v6.unwrap_or_default());
        flattened.insert(label, ips);
    }

    flattened
}

// ── DNSSEC ───────────────────────────────────────────────────────────

/// A DS record. The four fields together are its identity; there is no
/// server-assigned id, so deletion echoes the full tuple back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnssecRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub algorithm: String,
    #[serde(rename = "digestType", deserialize_with = "string_or_number")]
    pub digest_type: String,
    #[serde(rename = "keyTag", deserialize_with = "string_or_number")]
    pub key_tag: String,
    #[serde(deserialize_with = "string_or_number")]
    pub digest: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DnssecRecordsResponse {
    #[serde(rename = "dsRecords", default)]
    pub ds_records: Option<Vec<DnssecRecord>>,
}

// ── Serde helpers ────────────────────────────────────────────────────

fn is_blank(value: &Option<String>) -> bool {
    non_blank(value.as_ref()).is_none()
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(normalize_flag(value.as_ref()))
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

fn lenient_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
