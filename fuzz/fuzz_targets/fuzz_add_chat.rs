#![no_main]

//! Fuzz target for chat registration: any sequence of ids, with repeats,
//! must leave exactly one row per distinct id.

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use tempfile::tempdir;

use chatbot_store::Database;

fuzz_target!(|ids: Vec<i64>| {
    let ids: Vec<i64> = ids.into_iter().take(64).collect();

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

    let mut seen = BTreeSet::new();
    for id in &ids {
        let inserted = db.add_chat(*id).expect("insert-or-ignore should not fail");
        assert_eq!(inserted, seen.insert(*id));
    }

    let stored: BTreeSet<i64> = db
        .all_chat_ids()
        .expect("chat id query should succeed")
        .into_iter()
        .collect();
    assert_eq!(stored, seen);
    assert_eq!(db.all_chat_ids().map(|v| v.len()).unwrap_or(0), seen.len());
});
