//! # devnetiks
//!
//! Invoice totals, money parsing and access decisions from the command line.
//!
//! ```text
//! devnetiks totals draft.json --tax-rate 8.875
//! devnetiks parse-money '$1,234.56'
//! devnetiks access --role client --path /start --authenticated
//! devnetiks guard --authenticated --role staff --require admin
//! devnetiks config
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use devnetiks_cli::commands::{
    cmd_access, cmd_config, cmd_guard, cmd_parse_money, cmd_totals, TotalsOverrides,
};
use devnetiks_cli::config::AppConfig;
use devnetiks_core::TaxRate;

#[derive(Parser)]
#[command(name = "devnetiks")]
#[command(about = "Devnetiks portal money and access tools")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute invoice totals for a JSON draft.
    Totals {
        draft: PathBuf,
        /// Tax rate as a percentage, overriding the draft and settings.
        #[arg(long, allow_hyphen_values = true)]
        tax_rate: Option<TaxRate>,
        /// Discount as free text, e.g. "$10.00".
        #[arg(long, allow_hyphen_values = true)]
        discount: Option<String>,
    },
    /// Parse a free-text amount into cents.
    ParseMoney {
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Fail on unparseable input instead of returning 0.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Show permissions and navigation for a role.
    Access {
        #[arg(long)]
        role: Option<String>,
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(long, default_value_t = false)]
        authenticated: bool,
    },
    /// Evaluate the route guard.
    Guard {
        #[arg(long, default_value_t = false)]
        loading: bool,
        #[arg(long, default_value_t = false)]
        authenticated: bool,
        #[arg(long)]
        role: Option<String>,
        /// Required role; repeat for several.
        #[arg(long = "require")]
        require: Vec<String>,
    },
    /// Print the effective settings.
    Config,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref()).context("loading settings")?;
    info!(
        currency = %config.settings.currency.code,
        locale = %config.settings.currency.locale,
        "Settings loaded"
    );
    let settings = &config.settings;

    let output = match cli.command {
        Commands::Totals {
            draft,
            tax_rate,
            discount,
        } => {
            let overrides = TotalsOverrides { tax_rate, discount };
            cmd_totals(&draft, &overrides, settings)?
        }
        Commands::ParseMoney { text, strict } => cmd_parse_money(&text, strict, settings)?,
        Commands::Access {
            role,
            path,
            authenticated,
        } => cmd_access(role.as_deref(), &path, authenticated, settings)?,
        Commands::Guard {
            loading,
            authenticated,
            role,
            require,
        } => cmd_guard(loading, authenticated, role.as_deref(), &require, settings)?,
        Commands::Config => cmd_config(&config)?,
    };

    let text = serde_json::to_string_pretty(&output).context("rendering output")?;
    println!("{}", text);
    Ok(())
}
