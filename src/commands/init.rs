use anyhow::Result;

use chatbot_store::Database;
use chatbot_store::SchemaReport;

pub fn run(db: &Database) -> Result<()> {
    let report = db.ensure_schema()?;
    for line in describe(&report) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(report: &SchemaReport) -> [String; 2] {
    let line = |table: &str, created: bool| {
        if created {
            format!("Table '{}' created.", table)
        } else {
            format!("Table '{}' already exists.", table)
        }
    };
    [
        line("chats", report.chats_created),
        line("issues", report.issues_created),
    ]
}
