//! spotpris CLI - day-ahead electricity prices for the Norwegian zones.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use spotpris_lib::Tz;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "spotpris")]
#[command(about = "Hourly day-ahead electricity prices in NOK/kWh", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv). Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress status messages)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory the forecast cache and API keys are stored in
    #[arg(long, env = "SPOTPRIS_STORE_DIR", global = true)]
    store_dir: Option<PathBuf>,

    /// Time zone dates and hours are interpreted in
    #[arg(long, env = "SPOTPRIS_TIME_ZONE", default_value = "Europe/Oslo", value_parser = parse_time_zone, global = true)]
    time_zone: Tz,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the hourly price forecast of a zone
    Forecast {
        /// Price zone (NO1..NO5)
        zone: String,

        /// Local date (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,

        /// API key the request is counted against
        #[arg(short = 'k', long, env = "SPOTPRIS_API_KEY", hide_env_values = true)]
        api_key: String,

        /// ENTSO-E transparency platform security token
        #[arg(long, env = "SECURITY_TOKEN", hide_env_values = true)]
        security_token: String,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },

    /// List the price zones
    Zones,

    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

/// Administrator actions on API keys.
#[derive(Subcommand)]
enum KeyAction {
    /// Register a key, replacing any existing record
    Add {
        /// The API key
        key: String,

        /// Contact address of the key holder
        #[arg(short, long)]
        email: String,

        /// Requests allowed per zone per day
        #[arg(long, default_value = "100")]
        quota: u32,

        /// Display name of the key holder
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Block a key
    Block {
        /// The API key
        key: String,

        /// Reason shown to the key holder
        #[arg(short, long)]
        reason: String,
    },

    /// Show a key and its usage today
    Show {
        /// The API key
        key: String,
    },
}

fn parse_time_zone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let store = commands::StoreArgs {
        store_dir: cli.store_dir,
        time_zone: cli.time_zone,
    };

    match command {
        Commands::Forecast {
            zone,
            date,
            api_key,
            security_token,
            output,
            format,
        } => {
            commands::forecast::forecast(
                &store,
                &zone,
                date.as_deref(),
                &api_key,
                security_token,
                output,
                format,
                cli.quiet,
            )
            .await
        }
        Commands::Zones => {
            commands::zones::list_zones();
            Ok(())
        }
        Commands::Key { action } => match action {
            KeyAction::Add {
                key,
                email,
                quota,
                name,
            } => commands::key::add_key(&store, &key, &email, quota, name.as_deref()).await,
            KeyAction::Block { key, reason } => {
                commands::key::block_key(&store, &key, &reason).await
            }
            KeyAction::Show { key } => commands::key::show_key(&store, &key).await,
        },
    }
}
