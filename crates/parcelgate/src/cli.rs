//! Clap derive structures for the `parcelgate` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// parcelgate -- FedEx rates, tracking and CSP registration from the shell
#[derive(Debug, Parser)]
#[command(
    name = "parcelgate",
    version,
    about = "Quote FedEx rates and track shipments from the command line",
    long_about = "Talks to the FedEx XML web services gateway.\n\n\
        Register and subscribe once per account to obtain user credentials\n\
        and a meter number; they are saved into the active profile.",
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
    /// Carrier profile to use
    #[arg(long, short = 'p', env = "PARCELGATE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PARCELGATE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Use the beta gateway regardless of the profile
    #[arg(long, env = "PARCELGATE_TEST", global = true)]
    pub test: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PARCELGATE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

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

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register an end user and store the issued user credentials
    Register(RegisterArgs),

    /// Subscribe the registered user and store the issued meter number
    Subscribe(SubscribeArgs),

    /// Report the integrating software version to the gateway
    VersionCapture(VersionCaptureArgs),

    /// Quote rates for every available service
    #[command(alias = "rate")]
    Rates(RatesArgs),

    /// Show the scan history of a shipment
    #[command(alias = "t")]
    Track(TrackArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),
}

// ── Shared Argument Groups ───────────────────────────────────────────

/// Person registering or subscribing.
#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub fax: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

/// Postal address of the registering user (also used for billing).
#[derive(Debug, Args)]
pub struct AddressArgs {
    /// Street line (repeat for several lines)
    #[arg(long = "street")]
    pub street: Vec<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// State or province code
    #[arg(long)]
    pub province: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    /// Two-letter country code
    #[arg(long)]
    pub country: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REGISTRATION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Service category to request (repeatable, e.g. SHIPPING)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    #[command(flatten)]
    pub contact: ContactArgs,

    #[command(flatten)]
    pub address: AddressArgs,
}

#[derive(Debug, Args)]
pub struct SubscribeArgs {
    /// CSP solution id assigned by FedEx
    #[arg(long)]
    pub csp_solution_id: Option<String>,

    #[command(flatten)]
    pub contact: ContactArgs,

    #[command(flatten)]
    pub address: AddressArgs,
}

#[derive(Debug, Args)]
pub struct VersionCaptureArgs {
    /// CustomerTransactionId echoed back by the gateway
    #[arg(default_value = "Version Capture Request")]
    pub transaction_id: String,

    #[arg(long)]
    pub origin_location_id: Option<String>,

    /// Vendor product platform (e.g. "Windows OS")
    #[arg(long)]
    pub platform: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RATES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RatesArgs {
    /// Origin postal code
    #[arg(long)]
    pub from_postal_code: Option<String>,

    /// Origin country code
    #[arg(long)]
    pub from_country: String,

    #[arg(long)]
    pub from_city: Option<String>,

    /// Origin state or province code
    #[arg(long)]
    pub from_province: Option<String>,

    /// Destination postal code
    #[arg(long)]
    pub to_postal_code: Option<String>,

    /// Destination country code
    #[arg(long)]
    pub to_country: String,

    #[arg(long)]
    pub to_city: Option<String>,

    /// Destination state or province code
    #[arg(long)]
    pub to_province: Option<String>,

    /// Destination is a residence
    #[arg(long)]
    pub residential: bool,

    /// Package as "weight[,length,width,height]" (repeatable)
    #[arg(long = "package", required = true)]
    pub packages: Vec<String>,

    /// Packages are in grams and centimetres instead of ounces and inches
    #[arg(long)]
    pub metric: bool,

    /// Restrict to one service code (e.g. FEDEX_GROUND)
    #[arg(long)]
    pub service: Option<String>,

    /// Dropoff type (e.g. regular_pickup, dropbox)
    #[arg(long)]
    pub dropoff: Option<String>,

    /// Packaging type (e.g. your_packaging, fedex_box)
    #[arg(long)]
    pub packaging: Option<String>,

    /// Ship timestamp (RFC 3339); defaults to now
    #[arg(long)]
    pub ship_at: Option<String>,

    #[arg(long)]
    pub saturday_pickup: bool,

    #[arg(long)]
    pub saturday_delivery: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TRACKING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Tracking number (or other identifier, see --id-type)
    pub number: String,

    /// Identifier kind (e.g. tracking_number, door_tag, rma)
    #[arg(long)]
    pub id_type: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}
