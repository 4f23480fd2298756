//! Command-line front end for the divination core.
//!
//! # Responsibility
//! - Load configuration, start logging and open the record store.
//! - Map each subcommand onto one service operation and print JSON.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;
use yijing_core::db::{open_db, Connection};
use yijing_core::{
    init_from_config, AnalysisClient, AnalysisError, AppConfig, ChatCompletionClient,
    CreateDivinationRequest, DivinationService, Effects, FortuneService, OwnerId,
    SqliteDivinationRepository, SqliteFortuneRepository,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Parser)]
#[command(
    name = "yijing",
    version,
    about = "Divination records and daily fortunes"
)]
struct Cli {
    /// TOML config file; defaults apply when it does not exist.
    #[arg(long, default_value = "yijing.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a divination: zodiac, tarot, yijing or bazi.
    Divine {
        #[arg(long)]
        owner: OwnerId,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        question: String,
        /// Birth time `YYYY-MM-DD HH:MM:SS` for bazi, sign for zodiac.
        #[arg(long)]
        input: Option<String>,
    },
    /// List active divinations in creation order.
    History {
        #[arg(long)]
        owner: OwnerId,
    },
    /// Show one divination.
    Show {
        #[arg(long)]
        owner: OwnerId,
        #[arg(long)]
        id: Uuid,
    },
    /// Soft-delete one divination.
    Delete {
        #[arg(long)]
        owner: OwnerId,
        #[arg(long)]
        id: Uuid,
    },
    /// Today's fortune, generated on first request of the day.
    Fortune {
        #[arg(long)]
        owner: OwnerId,
    },
    /// Fortunes dated within an inclusive range, newest first.
    Fortunes {
        #[arg(long)]
        owner: OwnerId,
        /// `YYYY-MM-DD`
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// `YYYY-MM-DD`
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
    },
}

impl Command {
    fn needs_analysis(&self) -> bool {
        matches!(self, Command::Divine { .. } | Command::Fortune { .. })
    }
}

/// Stand-in for commands that only read or delete records.
struct Offline;

impl AnalysisClient for Offline {
    fn complete(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Err(AnalysisError::EmptyResponse)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load config `{}`", cli.config.display()))?;
    init_from_config(&config.logging).context("failed to start logging")?;

    let conn = open_db(&config.database.path).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database.path.display()
        )
    })?;

    let analysis: Box<dyn AnalysisClient> = if cli.command.needs_analysis() {
        Box::new(ChatCompletionClient::from_config(&config.analysis)?)
    } else {
        Box::new(Offline)
    };

    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    let output = match cli.command {
        Command::Divine {
            owner,
            kind,
            question,
            input,
        } => {
            let service = divinations(&conn, analysis);
            let request = CreateDivinationRequest::new(kind, question, input.map(Value::String));
            serde_json::to_value(service.create(owner, &request)?)?
        }
        Command::History { owner } => {
            serde_json::to_value(divinations(&conn, analysis).list_by_owner(owner)?)?
        }
        Command::Show { owner, id } => match divinations(&conn, analysis).get(owner, id)? {
            Some(record) => serde_json::to_value(record)?,
            None => bail!("record not found: {id}"),
        },
        Command::Delete { owner, id } => {
            divinations(&conn, analysis).soft_delete(owner, id)?;
            serde_json::json!({ "deleted": id.to_string() })
        }
        Command::Fortune { owner } => {
            serde_json::to_value(fortunes(&conn, analysis).calculate_today(owner)?)?
        }
        Command::Fortunes { owner, start, end } => {
            let records = fortunes(&conn, analysis).list_by_owner_in_range(owner, start, end)?;
            serde_json::to_value(records)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn divinations(
    conn: &Connection,
    analysis: Box<dyn AnalysisClient>,
) -> DivinationService<SqliteDivinationRepository<'_>, Box<dyn AnalysisClient>> {
    DivinationService::new(
        SqliteDivinationRepository::new(conn),
        analysis,
        Effects::system(),
    )
}

fn fortunes(
    conn: &Connection,
    analysis: Box<dyn AnalysisClient>,
) -> FortuneService<SqliteFortuneRepository<'_>, Box<dyn AnalysisClient>> {
    FortuneService::new(
        SqliteFortuneRepository::new(conn),
        analysis,
        Effects::system(),
    )
}

/// Runs inside argument parsing, so a bad date never reaches the database.
fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("expected YYYY-MM-DD, got `{value}`"))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Divine { .. } => "divine",
        Command::History { .. } => "history",
        Command::Show { .. } => "show",
        Command::Delete { .. } => "delete",
        Command::Fortune { .. } => "fortune",
        Command::Fortunes { .. } => "fortunes",
    }
}
