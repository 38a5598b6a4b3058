use anyhow::{bail, Result};

use chatbot_store::Database;

pub fn run(
    db: &Database,
    title: &str,
    description: Option<&str>,
    screenshot: Option<i64>,
    username: &str,
    jira: bool,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Issue title must not be empty");
    }
    if username.trim().is_empty() {
        bail!("Username must not be empty");
    }

    let id = db.add_issue(title, description, screenshot, username, jira)?;
    println!("Recorded issue #{} from {}", id, username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn setup_test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(&db_path).unwrap();
        db.ensure_schema().unwrap();
        (db, dir)
    }

    #[test]
    fn test_report_records_issue() {
        let (db, _dir) = setup_test_db();

        run(&db, "Login broken", None, Some(0), "alice", false).unwrap();

        let issues = db.recent_issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "Login broken");
        assert_eq!(issues[0].username, "alice");
    }

    #[test]
    fn test_report_rejects_blank_title() {
        let (db, _dir) = setup_test_db();

        let result = run(&db, "   ", None, None, "alice", false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("title"));
        assert!(db.recent_issues().unwrap().is_empty());
    }

    #[test]
    fn test_report_rejects_blank_username() {
        let (db, _dir) = setup_test_db();

        let result = run(&db, "Title", None, None, "", false);
        assert!(result.is_err());
        assert!(db.recent_issues().unwrap().is_empty());
    }

    #[test]
    fn test_report_propagates_storage_error() {
        let dir = tempdir().unwrap();
        let db = Database::open(&dir.path().join("bare.db")).unwrap();

        assert!(run(&db, "Title", None, None, "bob", true).is_err());
    }

    proptest! {
        #[test]
        fn prop_report_keeps_unicode_title(title in "\\PC{1,60}", user in "[a-z]{1,12}") {
            prop_assume!(!title.trim().is_empty());
            let (db, _dir) = setup_test_db();

            run(&db, &title, None, None, &user, false).unwrap();

            let issues = db.recent_issues().unwrap();
            prop_assert_eq!(&issues[0].title, &title);
            prop_assert_eq!(&issues[0].username, &user);
        }
    }
}
