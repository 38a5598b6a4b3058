use anyhow::Result;

use chatbot_store::Database;

pub fn run(db: &Database, json: bool) -> Result<()> {
    let ids = db.all_chat_ids()?;

    if json {
        println!("{}", serde_json::to_string(&ids)?);
        return Ok(());
    }

    if ids.is_empty() {
        println!("No chats registered.");
        return Ok(());
    }

    for id in ids {
        println!("{}", id);
    }
    Ok(())
}
