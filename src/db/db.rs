use rusqlite::{Connection, Result};
use std::path::Path;

pub const DB_FILE_NAME: &str = "taskdeck.db";

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id TEXT NOT NULL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    completed INTEGER NOT NULL DEFAULT 0,
    priority TEXT NOT NULL DEFAULT 'medium',
    tags TEXT,
    due_date TIMESTAMP,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);";
const INDEX_CREATED_AT: &str = "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: &Path) -> Result<Db> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Db> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Db> {
        conn.execute(SCHEMA_TASKS, [])?;
        conn.execute(INDEX_CREATED_AT, [])?;
        Ok(Db { conn })
    }
}
