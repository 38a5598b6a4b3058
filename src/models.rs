use serde::{Deserialize, Serialize};

/// One row of the rolling issue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentIssue {
    pub title: String,
    pub username: String,
    pub date_created: String,
}

impl RecentIssue {
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.title, &self.username, &self.date_created)
    }
}

/// Outcome of the startup check-then-create pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub chats_created: bool,
    pub issues_created: bool,
}
