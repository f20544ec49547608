//! Clap derive structures for the `pecron` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pecron -- query and control Pecron portable power stations
#[derive(Debug, Parser)]
#[command(
    name = "pecron",
    version,
    about = "Query and control Pecron portable power stations via the cloud API",
    long_about = "Unofficial CLI for the Pecron/Quectel cloud platform.\n\n\
        Lists the devices bound to an account, reports live telemetry\n\
        (battery, power, switches), and toggles AC/DC outputs.",
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
    /// Cloud region: CN, EU, or US
    #[arg(long, short = 'r', env = "PECRON_REGION", default_value = "US", global = true)]
    pub region: String,

    /// Account email (prompted when omitted)
    #[arg(long, short = 'e', env = "PECRON_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, short = 'p', env = "PECRON_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Filter to devices whose name contains this substring
    #[arg(long, short = 'd', value_name = "NAME", global = true)]
    pub device: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PECRON_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "PECRON_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table / report (default, interactive)
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
    /// List devices bound to the account
    #[command(alias = "dev", alias = "ls")]
    Devices,

    /// Show device status (battery, power, switches)
    #[command(alias = "st")]
    Status,

    /// Dump raw business attributes as JSON
    Raw,

    /// Show a product's property schema (Thing Specification)
    Schema,

    /// Send a control command to matching devices
    Set(SetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SET
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommand,
}

#[derive(Debug, Subcommand)]
pub enum SetCommand {
    /// Toggle the AC output
    Ac {
        /// Desired switch state
        state: SwitchState,
    },

    /// Toggle the DC output
    Dc {
        /// Desired switch state
        state: SwitchState,
    },

    /// Set an arbitrary writable property (see `pecron schema`)
    Prop {
        /// Property resource code, e.g. ac_switch_hm
        code: String,

        /// Value, parsed as JSON when possible (true, 42, "text")
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn as_bool(self) -> bool {
        matches!(self, Self::On)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
