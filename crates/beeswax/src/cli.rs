//! Clap derive structures for the `beeswax` CLI.
//!
//! Kept free of crate-local imports: `build.rs` includes this file directly
//! to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// beeswax -- command-line access to the Beeswax ad-ops API
#[derive(Debug, Parser)]
#[command(
    name = "beeswax",
    version,
    about = "Work with the Beeswax advertising API from the command line",
    long_about = "Call any Beeswax REST endpoint through a session that logs in \
        with stored credentials and re-authenticates once when a call fails.",
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
    /// API base URL (overrides the config file)
    #[arg(long, short = 'e', env = "BEESWAX_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Login email (overrides environment, keyring and config)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Output format [default: from config, else json]
    #[arg(long, short = 'o', env = "BEESWAX_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage credentials stored in the OS keyring
    #[command(alias = "creds")]
    Credentials(CredentialsArgs),

    /// Inspect or edit the configuration file
    Config(ConfigArgs),

    /// Issue a raw API request through the re-authenticating session
    Call(CallArgs),

    /// Log in and print the session payload
    Login(LoginArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Credentials ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CredentialsCommand {
    /// Store a username and password, prompting for any not given
    Set {
        /// Login email
        #[arg(long)]
        username: Option<String>,

        /// Password (prompted without echo when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Show the stored username and whether a password is stored
    Show,

    /// Remove stored credentials
    Clear,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Save the API base URL to the config file
    SetEndpoint {
        /// e.g. https://acme.api.beeswax.com/rest/
        url: String,
    },
}

// ── Call ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Args)]
pub struct CallArgs {
    /// HTTP method
    #[arg(value_enum, ignore_case = true)]
    pub method: HttpMethod,

    /// Path segments appended to the endpoint, e.g. `campaign` or
    /// `segment_upload upload 12`
    #[arg(required = true, num_args = 1..)]
    pub segments: Vec<String>,

    /// Query parameter as key=value (repeatable); values that parse as JSON
    /// are sent as such
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// JSON object sent as the request body
    #[arg(long, value_name = "JSON")]
    pub body: Option<String>,

    /// File sent as a multipart upload
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Store the credentials in the keyring after a successful login
    #[arg(long)]
    pub save: bool,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
