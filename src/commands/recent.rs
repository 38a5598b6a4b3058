use anyhow::Result;

use chatbot_store::Database;
use chatbot_store::RecentIssue;

pub fn run(db: &Database, json: bool) -> Result<()> {
    let issues = db.recent_issues()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("No issues in the last 30 days.");
        return Ok(());
    }

    for issue in &issues {
        println!("{}", format_row(issue));
    }
    Ok(())
}

fn format_row(issue: &RecentIssue) -> String {
    format!(
        "{}  {:<16} {}",
        issue.date_created,
        truncate(&issue.username, 16),
        truncate(&issue.title, 50)
    )
}

fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}
