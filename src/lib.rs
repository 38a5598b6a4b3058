//! Storage layer for the support bot: issue reports and the chats the
//! bot broadcasts to, kept in a single SQLite file.

pub mod db;
pub mod logging;
pub mod models;

pub use db::Database;
pub use logging::LogOnError;
pub use models::{RecentIssue, SchemaReport};
