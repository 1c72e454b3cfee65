use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_core::{
    Account, Transaction, filter_current_month, find_account, find_account_mut, format_amount,
    parse_date,
};
use tally_finance::{Breakdown, KeywordTable, demo_accounts, import_into};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::{Config, InitOutcome};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Accounts, transactions and monthly expense breakdowns")]
struct Cli {
    /// CSV of transactions (date,name,amount) to load into the session
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Account that --csv rows are added to (created if missing)
    #[arg(long, global = true, default_value = "Imported")]
    csv_account: String,

    /// Pin the clock: RFC 3339 timestamp or YYYY-MM-DD
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List accounts with their balances
    Accounts,

    /// List an account's transactions for the current month
    Transactions {
        #[arg(long)]
        account: Option<String>,

        /// Show every transaction, not just this month's
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Categorized breakdown of this month's transactions
    Breakdown {
        #[arg(long)]
        account: Option<String>,

        /// Print the chart data as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Add a transaction to an account in this session
    Add {
        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        name: String,

        /// Signed amount, negative for spending
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// YYYY-MM-DD (defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Manage config.toml under $TALLY_HOME (default ~/.tally)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

/// Everything a command needs: the clock, the zone and the accounts.
struct Session {
    now: DateTime<Utc>,
    tz: Tz,
    table: KeywordTable,
    default_account: String,
    accounts: Vec<Account>,
}

impl Session {
    fn load(cli: &Cli, cfg: &Config) -> Result<Self> {
        let tz = cfg.timezone()?;
        let table = cfg.keyword_table()?;
        let now = match &cli.now {
            Some(s) => parse_date(s, &tz).with_context(|| format!("--now {s}"))?,
            None => Utc::now(),
        };

        let mut accounts = demo_accounts(now);
        if let Some(csv_path) = &cli.csv {
            if find_account(&accounts, &cli.csv_account).is_none() {
                accounts.push(Account::new(cli.csv_account.clone()));
            }
            let account = find_account_mut(&mut accounts, &cli.csv_account)
                .context("import account vanished")?;
            let count = import_into(account, csv_path, &tz)
                .with_context(|| format!("importing {}", csv_path.display()))?;
            tracing::debug!(count, account = %cli.csv_account, "loaded csv");
        }

        Ok(Self {
            now,
            tz,
            table,
            default_account: cfg.general.default_account.clone(),
            accounts,
        })
    }

    fn resolve_name(&self, account: Option<&str>) -> String {
        account.map_or_else(|| self.default_account.clone(), str::to_string)
    }

    fn account(&self, name: &str) -> Result<&Account> {
        find_account(&self.accounts, name).with_context(|| format!("account not found: {name}"))
    }
}

fn open_session(cli: &Cli) -> Result<Session> {
    let cfg = Config::load(&state::config_path()?)?;
    Session::load(cli, &cfg)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let path = state::config_path()?;
                match Config::init(&path)? {
                    InitOutcome::Written => println!("Wrote {}", path.display()),
                    InitOutcome::AlreadyExists => {
                        println!("Config already exists: {}", path.display())
                    }
                }
            }
            ConfigCommand::Show => {
                let cfg = Config::load(&state::config_path()?)?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Accounts => {
            let session = open_session(&cli)?;
            print_accounts(&session.accounts);
        }

        Command::Transactions { account, all } => {
            let session = open_session(&cli)?;
            let name = session.resolve_name(account.as_deref());
            let account = session.account(&name)?;
            let txns: Vec<&Transaction> = if *all {
                account.transactions().iter().collect()
            } else {
                filter_current_month(account.transactions(), &session.now, &session.tz)
            };
            print_transactions(account, &txns, &session.tz);
        }

        Command::Breakdown { account, json } => {
            let session = open_session(&cli)?;
            let name = session.resolve_name(account.as_deref());
            let account = session.account(&name)?;
            let breakdown =
                Breakdown::for_account(account, &session.table, &session.now, &session.tz);
            if *json {
                println!("{}", serde_json::to_string_pretty(&breakdown.chart())?);
            } else {
                print_breakdown(account, &breakdown);
            }
        }

        Command::Add {
            account,
            name,
            amount,
            date,
        } => {
            let mut session = open_session(&cli)?;
            let account_name = session.resolve_name(account.as_deref());
            let tz = session.tz;
            let date = match date {
                Some(d) => parse_date(d, &tz).with_context(|| format!("--date {d}"))?,
                None => session.now,
            };
            let account = find_account_mut(&mut session.accounts, &account_name)
                .with_context(|| format!("account not found: {account_name}"))?;

            let added = match account.add_transaction(name.as_str(), amount, date) {
                Ok(t) => t.clone(),
                Err(e) if e.is_invalid_amount() => {
                    bail!("amount must be a number, got '{amount}'; {account_name} was not changed")
                }
                Err(e) => return Err(e.into()),
            };

            println!(
                "Added '{}' {} on {} to {}",
                added.name(),
                format_amount(added.amount()),
                added.date().with_timezone(&tz).format("%Y-%m-%d"),
                account.name()
            );
            println!("Balance: {}", format_amount(account.balance()));
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_accounts(accounts: &[Account]) {
    println!("Accounts\n");
    for a in accounts {
        println!("{:<24} {:>12}", a.name(), format_amount(a.balance()));
    }
}

fn print_transactions(account: &Account, txns: &[&Transaction], tz: &Tz) {
    println!("{}", account.name());
    println!("Balance: {}\n", format_amount(account.balance()));

    if txns.is_empty() {
        println!("(no transactions)");
        return;
    }
    for t in txns {
        let flow = if t.is_income() {
            "in"
        } else if t.is_expense() {
            "out"
        } else {
            "-"
        };
        println!(
            "{}  {:<32} {:>12}  {}",
            t.date().with_timezone(tz).format("%Y-%m-%d"),
            t.name(),
            format_amount(t.amount()),
            flow
        );
    }
}

fn print_breakdown(account: &Account, breakdown: &Breakdown) {
    println!("Expense Breakdown: {}\n", account.name());

    if breakdown.is_empty() {
        println!("(nothing to chart this month)");
        return;
    }

    for row in breakdown.bars() {
        println!("{:<16} {:>12}", row.category.label(), format_amount(row.amount));
    }

    println!();
    for s in breakdown.pie_slices() {
        println!(
            "{:<16} {:>6.1}° - {:>6.1}° ({:>5.1}°)  {:>5.1}%",
            s.category.label(),
            s.start_angle,
            s.end_angle,
            s.span(),
            s.percentage
        );
    }
}
