mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chatbot_store::db::DEFAULT_DB_FILE;
use chatbot_store::logging::{self, DEFAULT_LOG_FILE};
use chatbot_store::{Database, LogOnError};

#[derive(Parser)]
#[command(name = "chatbot-store")]
#[command(about = "Manage the support bot's issue and chat database")]
#[command(version)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "CHATBOT_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// File that receives a copy of every log line
    #[arg(long, global = true, env = "CHATBOT_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "CHATBOT_LOG_JSON")]
    log_json: bool,

    /// Log storage failures and exit successfully instead of returning an error
    #[arg(long, global = true)]
    lenient: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the chats and issues tables if they are missing
    Init,

    /// Record an issue report
    Report {
        /// Issue title
        title: String,
        /// Reporting user
        #[arg(short, long)]
        username: String,
        /// Issue description
        #[arg(short, long)]
        description: Option<String>,
        /// Screenshot reference
        #[arg(short, long)]
        screenshot: Option<i64>,
        /// Mark the issue as forwarded to Jira
        #[arg(long)]
        jira: bool,
    },

    /// Register a chat to receive bot messages
    Register {
        /// Chat ID (group chats are negative)
        #[arg(allow_hyphen_values = true)]
        chat_id: i64,
    },

    /// List registered chat IDs
    Chats {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// List issues reported in the last 30 days, newest first
    Recent {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn dispatch(db: &Database, command: Commands) -> Result<()> {
    match command {
        Commands::Init => commands::init::run(db),

        Commands::Report {
            title,
            username,
            description,
            screenshot,
            jira,
        } => commands::report::run(
            db,
            &title,
            description.as_deref(),
            screenshot,
            &username,
            jira,
        ),

        Commands::Register { chat_id } => commands::register::run(db, chat_id),

        Commands::Chats { json } => commands::chats::run(db, json),

        Commands::Recent { json } => commands::recent::run(db, json),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, cli.verbose, cli.log_json)?;

    let db = Database::open(&cli.db).context("Failed to open database")?;
    let outcome = dispatch(&db, cli.command);

    if cli.lenient {
        outcome.or_log("command");
        db.close().or_log("close");
        return Ok(());
    }

    outcome?;
    db.close()
}
