#![no_main]

//! Fuzz target for issue inserts and the rolling report.
//!
//! Arbitrary titles and usernames, including quotes and NUL bytes, must be
//! stored verbatim and come back out of the report unchanged.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tempfile::tempdir;

use chatbot_store::Database;

#[derive(Arbitrary, Debug)]
struct IssueInput {
    title: String,
    description: Option<String>,
    screenshot: Option<i64>,
    username: String,
    jira: bool,
    /// Number of copies to insert
    count: u8,
}

fuzz_target!(|input: IssueInput| {
    let count = (input.count % 10).max(1) as usize;

    let dir = match tempdir() {
        Ok(d) => d,
        Err(_) => return,
    };
    let db = match Database::open(&dir.path().join("sqlite.db")) {
        Ok(d) => d,
        Err(_) => return,
    };
    if db.ensure_schema().is_err() {
        return;
    }

    for _ in 0..count {
        db.add_issue(
            &input.title,
            input.description.as_deref(),
            input.screenshot,
            &input.username,
            input.jira,
        )
        .expect("parameterized insert should accept any text");
    }

    let issues = db.recent_issues().expect("report query should succeed");
    assert_eq!(issues.len(), count);
    for issue in &issues {
        assert_eq!(issue.title, input.title);
        assert_eq!(issue.username, input.username);
    }
    for pair in issues.windows(2) {
        assert!(pair[0].date_created >= pair[1].date_created);
    }

    assert!(db.table_exists("issues").unwrap_or(false));
    let _ = db.close();
});
