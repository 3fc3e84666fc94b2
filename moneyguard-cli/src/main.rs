use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use moneyguard_core::{format_hryvnia, Amount, Period, TransactionDate, TransactionRecord};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod auth;
mod config;
mod state;
mod stats_cmd;

use app::App;
use auth::AuthCommand;

#[derive(Parser, Debug)]
#[command(
    name = "moneyguard",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MONEYGUARD_BUILD_SHA"), ")"),
    about = "MoneyGuard personal finance tracker"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Skip the wallet API and use local data only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Sign in, sign out, and profile commands
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Record and list cached transactions
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },

    /// List expense categories
    Categories,

    /// Show the current balance
    Balance,

    /// Monthly per-category summary and expense breakdown
    Stats {
        /// Month 1-12 (default: current month)
        #[arg(long)]
        month: Option<u32>,

        /// Year (default: current year)
        #[arg(long)]
        year: Option<i32>,

        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.moneyguard/config.toml
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(Subcommand, Debug)]
enum TxCommand {
    /// Append a transaction to the local cache
    Add {
        /// DD-MM-YYYY or YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        sum: String,

        /// income or expense
        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long)]
        comment: Option<String>,
    },

    /// List cached transactions
    List {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let cfg = config::load_config()?;

    if let Command::Config { command } = &cli.command {
        match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        }
        return Ok(());
    }

    let app = App::from_config(&cfg, cli.offline)?;

    match cli.command {
        Command::Config { .. } => {}

        Command::Auth { command } => auth::run(&app, command).await?,

        Command::Tx { command } => match command {
            TxCommand::Add {
                date,
                category,
                sum,
                kind,
                comment,
            } => {
                let record = TransactionRecord {
                    date: date
                        .map(TransactionDate::new)
                        .unwrap_or_else(|| TransactionDate::from_date(today())),
                    category,
                    sum: Amount::Text(sum),
                    kind,
                    comment,
                };
                if record.date.date().is_none() {
                    tracing::warn!(
                        date = record.date.raw(),
                        "date not recognized; this transaction will not appear in monthly stats"
                    );
                }
                let count = app.ledger.append(record)?;
                println!("Saved. {count} cached transaction(s).");
            }
            TxCommand::List { month, year } => {
                let txns = app.ledger.load()?;
                let shown: Vec<&TransactionRecord> = if month.is_some() || year.is_some() {
                    let p = resolve_period(month, year)?;
                    txns.iter()
                        .filter(|t| t.date.is_in_month(p.month, p.year))
                        .collect()
                } else {
                    txns.iter().collect()
                };

                for t in &shown {
                    println!(
                        "{:<12} {:<20} {:>14} {}",
                        t.date.raw(),
                        t.category_label(),
                        format_hryvnia(t.amount()),
                        t.kind.as_deref().unwrap_or("")
                    );
                }
                println!("\n{} of {} cached transaction(s)", shown.len(), txns.len());
            }
        },

        Command::Categories => {
            let ctx = app.session.saved_context()?;
            for c in app.catalog.categories(&ctx).await {
                println!("{c}");
            }
        }

        Command::Balance => {
            let ctx = app.session.saved_context()?;
            let balance = app.session.total_balance(&ctx).await?;
            println!("{}", format_hryvnia(balance));
        }

        Command::Stats { month, year, json } => {
            let period = resolve_period(month, year)?;
            stats_cmd::run(&app, period, json).await?;
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Fill missing month/year from today.
fn resolve_period(month: Option<u32>, year: Option<i32>) -> Result<Period> {
    let now = today();
    Period::new(month.unwrap_or(now.month()), year.unwrap_or(now.year()))
}
