use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            schedule_id TEXT PRIMARY KEY NOT NULL,
            account_id TEXT NOT NULL,
            agent_id TEXT,
            start_time INTEGER,
            end_time INTEGER,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            tasks_id TEXT PRIMARY KEY NOT NULL,
            account_id TEXT NOT NULL,
            schedule_id TEXT NOT NULL,
            type TEXT NOT NULL,
            start_time INTEGER,
            duration INTEGER,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (schedule_id) REFERENCES schedules(schedule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_account ON schedules(account_id);
        CREATE INDEX IF NOT EXISTS idx_schedules_created ON schedules(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_tasks_schedule ON tasks(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_account ON tasks(account_id);
        "#,
    )
    .context("Failed to initialize schema")?;

    Ok(())
}
