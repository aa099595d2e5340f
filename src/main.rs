use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::run_shell;
use expense_tracker::clock::{Clock, FixedClock, SystemClock};
use expense_tracker::config::{AppConfig, ExpensePaths};
use expense_tracker::display::format_currency_list;
use expense_tracker::platform::{app_info, AppInfo};
use expense_tracker::session::Session;
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal income and expense tracker",
    long_about = "Track income and expenses from an interactive shell. Sign in, \
                  record transactions by category and payment type, and review \
                  summaries over daily to half-yearly windows. Data lives for the \
                  length of a session; use 'export' to keep a copy."
)]
struct Cli {
    /// Directory holding config.json
    #[arg(long, global = true, env = "EXPENSE_TRACKER_DIR")]
    config_dir: Option<PathBuf>,

    /// Log filter, e.g. info or expense_tracker=debug
    #[arg(long, global = true, env = "EXPENSE_LOG")]
    log_level: Option<String>,

    /// Read shell commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Write a config file with default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// List supported currencies
    Currencies {
        /// Match on code or name
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new(cli.config_dir.clone())?;
    let config = AppConfig::load_or_create(&paths)
        .with_context(|| format!("Failed to load {}", paths.settings_file().display()))?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        None | Some(Commands::Shell) => run(&cli, &config)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.settings_file().display());
            } else {
                config.save(&paths)?;
                println!("Wrote default config to: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            let platform = app_info();
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.config_dir().display());
            println!(
                "Config file:      {}{}",
                paths.settings_file().display(),
                if paths.is_initialized() { "" } else { " (not created)" }
            );
            println!();
            println!("Settings:");
            let settings = config.initial_user_settings(platform);
            println!("  Currency:           {}", settings.currency);
            println!("  Home duration:      {}", settings.home_duration.as_str());
            println!("  Custom days:        {}", settings.custom_days);
            println!("  History page size:  {}", config.history_page_size);
            println!("  Seed catalog:       {}", config.seed_default_catalog);
            println!();
            println!("Platform:");
            println!(
                "  {} {} on {} ({})",
                platform.package_name(),
                platform.version_name(),
                platform.os_version(),
                platform.device_model()
            );
            println!("  Country:            {}", platform.country_code());
        }
        Some(Commands::Currencies { filter }) => {
            println!("{}", format_currency_list(filter.as_deref()));
        }
    }

    Ok(())
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let clock: Arc<dyn Clock> = match cli.today {
        Some(date) => Arc::new(FixedClock::new(date)),
        None => Arc::new(SystemClock),
    };
    let storage = Storage::in_memory(
        clock,
        config.initial_user_settings(app_info()),
        config.seed_default_catalog,
    );
    let mut session = Session::new(Arc::new(storage), config.history_page_size);
    info!(screen = %session.screen(), "session started");

    let mut stdout = io::stdout().lock();
    match &cli.script {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            run_shell(&mut session, io::BufReader::new(file), &mut stdout, false)?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            run_shell(&mut session, stdin.lock(), &mut stdout, interactive)?;
        }
    }
    Ok(())
}
