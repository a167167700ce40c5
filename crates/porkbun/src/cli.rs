//! Clap derive structures for the `porkbun` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// porkbun -- manage Porkbun domains from the command line
#[derive(Debug, Parser)]
#[command(
    name = "porkbun",
    version,
    about = "Manage Porkbun DNS records, nameservers, glue and DNSSEC",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "PORKBUN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API key (overrides profile)
    #[arg(long, env = "PORKBUN_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Secret API key (overrides profile)
    #[arg(
        long,
        env = "PORKBUN_SECRET_API_KEY",
        global = true,
        hide_env_values = true
    )]
    pub secret_api_key: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "PORKBUN_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PORKBUN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (no timeout unless set)
    #[arg(long, env = "PORKBUN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials and print the IP the API sees
    Ping,

    /// Manage DNS records
    #[command(alias = "dns", alias = "r")]
    Records(RecordsArgs),

    /// Show or replace registered nameservers
    #[command(alias = "ns")]
    Nameservers(NameserversArgs),

    /// Manage glue records (registry host objects)
    Glue(GlueArgs),

    /// Manage DS records published at the registry
    Dnssec(DnssecArgs),

    /// Show TLD registration, renewal and transfer prices
    Pricing(PricingArgs),

    /// List domains in the account
    Domains(DomainsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List all records of a domain
    #[command(alias = "ls")]
    List {
        domain: String,
        /// Only show records of this type (A, MX, TXT, ...)
        #[arg(long, short = 't')]
        r#type: Option<String>,
    },

    /// Show one record by id
    Get { domain: String, id: String },

    /// Create a record and print its id
    Create {
        domain: String,
        #[command(flatten)]
        record: RecordFields,
    },

    /// Replace a record's fields
    Edit {
        domain: String,
        id: String,
        #[command(flatten)]
        record: RecordFields,
    },

    /// Delete a record by id
    #[command(alias = "rm")]
    Delete {
        domain: String,
        id: String,
        /// Succeed if the record or domain no longer exists
        #[arg(long)]
        ignore_missing: bool,
    },
}

#[derive(Debug, Args)]
pub struct RecordFields {
    /// Record type (A, AAAA, CNAME, MX, TXT, SRV, ...)
    #[arg(long, short = 't')]
    pub r#type: String,

    /// Record content (address, target, text)
    #[arg(long, short = 'c')]
    pub content: String,

    /// Subdomain label; empty or omitted for the apex
    #[arg(long, short = 'n', default_value = "")]
    pub name: String,

    /// TTL in seconds
    #[arg(long)]
    pub ttl: Option<String>,

    /// Priority (MX and SRV only)
    #[arg(long)]
    pub prio: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

// ── Nameservers ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NameserversArgs {
    #[command(subcommand)]
    pub command: NameserversCommand,
}

#[derive(Debug, Subcommand)]
pub enum NameserversCommand {
    /// Show the registered nameservers
    Get { domain: String },

    /// Replace the registered nameservers
    Set {
        domain: String,
        #[arg(required = true, num_args = 1..)]
        nameservers: Vec<String>,
    },

    /// Point the domain back at Porkbun's own nameservers
    Reset { domain: String },
}

// ── Glue ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlueArgs {
    #[command(subcommand)]
    pub command: GlueCommand,
}

#[derive(Debug, Subcommand)]
pub enum GlueCommand {
    /// List glue hosts and their addresses
    #[command(alias = "ls")]
    List { domain: String },

    /// Create a glue host
    Add {
        domain: String,
        /// Host label under the domain (e.g. ns1)
        host: String,
        #[arg(required = true, num_args = 1..)]
        ips: Vec<String>,
    },

    /// Delete a glue host
    #[command(alias = "rm")]
    Delete {
        domain: String,
        host: String,
        /// Succeed if the host or domain no longer exists
        #[arg(long)]
        ignore_missing: bool,
    },

    /// Replace a glue host's addresses (delete, then add)
    Replace {
        domain: String,
        host: String,
        #[arg(required = true, num_args = 1..)]
        ips: Vec<String>,
    },
}

// ── DNSSEC ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DnssecArgs {
    #[command(subcommand)]
    pub command: DnssecCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnssecCommand {
    /// List published DS records
    #[command(alias = "ls")]
    List { domain: String },

    /// Publish a DS record
    Add {
        domain: String,
        #[command(flatten)]
        record: DsFields,
    },

    /// Withdraw a DS record (all four fields must match)
    #[command(alias = "rm")]
    Delete {
        domain: String,
        #[command(flatten)]
        record: DsFields,
        /// Succeed if the record or domain no longer exists
        #[arg(long)]
        ignore_missing: bool,
    },

    /// Withdraw one DS record and publish another
    Replace {
        domain: String,
        #[command(flatten)]
        old: OldDsFields,
        #[command(flatten)]
        new: DsFields,
    },
}

#[derive(Debug, Args)]
pub struct DsFields {
    #[arg(long)]
    pub algorithm: String,
    #[arg(long)]
    pub digest_type: String,
    #[arg(long)]
    pub key_tag: String,
    #[arg(long)]
    pub digest: String,
}

#[derive(Debug, Args)]
pub struct OldDsFields {
    #[arg(long)]
    pub old_algorithm: String,
    #[arg(long)]
    pub old_digest_type: String,
    #[arg(long)]
    pub old_key_tag: String,
    #[arg(long)]
    pub old_digest: String,
}

// ── Pricing / Domains ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PricingArgs {
    /// Only show these TLDs
    #[arg(long, value_delimiter = ',')]
    pub tld: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DomainsArgs {
    #[command(subcommand)]
    pub command: DomainsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List every domain in the account
    #[command(alias = "ls")]
    List,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the current configuration (secrets masked)
    Show,

    /// Store a key in the system keyring for the active profile
    SetSecret {
        #[arg(value_enum)]
        which: SecretTarget,
        /// Value to store; prompted for when omitted
        value: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecretTarget {
    ApiKey,
    SecretApiKey,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
