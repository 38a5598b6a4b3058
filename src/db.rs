use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

use crate::models::{RecentIssue, SchemaReport};

pub const DEFAULT_DB_FILE: &str = "sqlite.db";

/// Stored timestamps sort lexicographically in chronological order only
/// while every row uses this exact layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const RECENT_WINDOW_DAYS: i64 = 30;

const CREATE_CHATS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS chats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        chat_id INTEGER UNIQUE NOT NULL,
        date_added TEXT NOT NULL
    );
"#;

// jira_issues_url has no writer yet; the column is kept so existing
// databases and future tooling agree on the layout.
const CREATE_ISSUES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS issues (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        screenshot INTEGER,
        jira BOOLEAN DEFAULT FALSE,
        date_created TEXT NOT NULL,
        username TEXT NOT NULL,
        jira_issues_url TEXT DEFAULT NULL
    );
"#;

/// Owns the single connection to the bot's database file.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so sharing one
/// `Database` between threads needs an outer `Mutex`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the database file, creating it if it does not exist yet.
    /// Tables are not created here; see [`Database::ensure_schema`].
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        debug!(path = %path.display(), "opened database");
        Ok(Database { conn })
    }

    /// Releases the connection. Consuming `self` rules out a second close
    /// and any use after closing.
    pub fn close(self) -> Result<()> {
        info!("closing database");
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("Failed to close database")
    }

    // Schema
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table_name],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to look up table '{}'", table_name))?;
        Ok(found.is_some())
    }

    pub fn create_chats_table(&self) -> Result<()> {
        self.conn
            .execute_batch(CREATE_CHATS_TABLE)
            .context("Failed to create table 'chats'")?;
        info!(table = "chats", "table ready");
        Ok(())
    }

    pub fn create_issues_table(&self) -> Result<()> {
        self.conn
            .execute_batch(CREATE_ISSUES_TABLE)
            .context("Failed to create table 'issues'")?;
        info!(table = "issues", "table ready");
        Ok(())
    }

    /// Startup pass: check each table and create the ones that are missing.
    /// Not atomic across the two tables; run it from a single process.
    pub fn ensure_schema(&self) -> Result<SchemaReport> {
        let mut report = SchemaReport::default();

        if self.table_exists("chats")? {
            info!(table = "chats", "table already exists");
        } else {
            self.create_chats_table()?;
            report.chats_created = true;
        }

        if self.table_exists("issues")? {
            info!(table = "issues", "table already exists");
        } else {
            self.create_issues_table()?;
            report.issues_created = true;
        }

        Ok(report)
    }

    // Issues
    pub fn add_issue(
        &self,
        title: &str,
        description: Option<&str>,
        screenshot: Option<i64>,
        username: &str,
        jira: bool,
    ) -> Result<i64> {
        self.add_issue_at(
            title,
            description,
            screenshot,
            username,
            jira,
            Local::now().naive_local(),
        )
    }

    pub fn add_issue_at(
        &self,
        title: &str,
        description: Option<&str>,
        screenshot: Option<i64>,
        username: &str,
        jira: bool,
        created: NaiveDateTime,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO issues (title, description, screenshot, jira, date_created, username) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![title, description, screenshot, jira, format_timestamp(created), username],
            )
            .context("Failed to insert issue")?;
        let id = self.conn.last_insert_rowid();
        info!(id, username, jira, "issue recorded");
        Ok(id)
    }

    /// Issues created within the last [`RECENT_WINDOW_DAYS`] days, newest first.
    pub fn recent_issues(&self) -> Result<Vec<RecentIssue>> {
        self.recent_issues_at(Local::now().naive_local())
    }

    pub fn recent_issues_at(&self, now: NaiveDateTime) -> Result<Vec<RecentIssue>> {
        let cutoff = format_timestamp(now - Duration::days(RECENT_WINDOW_DAYS));
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT title, username, date_created
                FROM issues
                WHERE date_created >= ?1
                ORDER BY date_created DESC, id DESC
                "#,
            )
            .context("Failed to prepare recent issues query")?;

        let issues = stmt
            .query_map([&cutoff], |row| {
                Ok(RecentIssue {
                    title: row.get(0)?,
                    username: row.get(1)?,
                    date_created: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read recent issues")?;

        debug!(count = issues.len(), %cutoff, "loaded recent issues");
        Ok(issues)
    }

    // Chats
    pub fn add_chat(&self, chat_id: i64) -> Result<bool> {
        self.add_chat_at(chat_id, Local::now().naive_local())
    }

    /// Registers a chat. Returns `false` when `chat_id` was already present;
    /// the existing row is left untouched.
    pub fn add_chat_at(&self, chat_id: i64, added: NaiveDateTime) -> Result<bool> {
        let rows = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO chats (chat_id, date_added) VALUES (?1, ?2)",
                params![chat_id, format_timestamp(added)],
            )
            .with_context(|| format!("Failed to register chat {}", chat_id))?;

        if rows > 0 {
            info!(chat_id, "chat registered");
        } else {
            info!(chat_id, "chat already registered");
        }
        Ok(rows > 0)
    }

    pub fn all_chat_ids(&self) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT chat_id FROM chats")
            .context("Failed to prepare chat id query")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()
            .context("Failed to read chat ids")?;
        debug!(count = ids.len(), "loaded chat ids");
        Ok(ids)
    }
}

pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}
