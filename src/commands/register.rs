use anyhow::Result;

use chatbot_store::Database;

pub fn run(db: &Database, chat_id: i64) -> Result<()> {
    if db.add_chat(chat_id)? {
        println!("Registered chat {}", chat_id);
    } else {
        println!("Chat {} is already registered", chat_id);
    }
    Ok(())
}
