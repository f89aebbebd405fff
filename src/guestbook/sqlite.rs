use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::DateTime;
use rusqlite::{Connection, params};
use std::sync::{Mutex, MutexGuard};

use super::{Greeting, GreetingKey, GreetingStore, GuestbookKey};

/// SQLite-backed greeting store.
///
/// One connection behind a mutex: every read observes every write that
/// finished before it, which is the strong consistency an ancestor query needs.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the greetings table at `path`.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open guestbook database")?;
        // AUTOINCREMENT keeps ids monotonic and never hands out a deleted one.
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS greetings (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                guestbook TEXT NOT NULL,
                author    TEXT NOT NULL DEFAULT '',
                content   TEXT NOT NULL,
                date      INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS greetings_by_guestbook_date
                ON greetings (guestbook, date DESC, id DESC);",
        )
        .context("failed to create greetings table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("guestbook database lock poisoned"))
    }
}

#[async_trait]
impl GreetingStore for SqliteStore {
    async fn put(&self, parent: &GuestbookKey, greeting: Greeting) -> Result<GreetingKey> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO greetings (guestbook, author, content, date) VALUES (?1, ?2, ?3, ?4)",
            params![
                parent.name(),
                greeting.author,
                greeting.content,
                greeting.date.timestamp_micros()
            ],
        )?;
        Ok(GreetingKey(conn.last_insert_rowid()))
    }

    async fn query(&self, ancestor: &GuestbookKey, limit: usize) -> Result<Vec<Greeting>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT author, content, date FROM greetings
             WHERE guestbook = ?1
             ORDER BY date DESC, id DESC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![ancestor.name(), limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(author, content, micros)| {
                let date = DateTime::from_timestamp_micros(micros)
                    .with_context(|| format!("greeting date out of range: {micros}"))?;
                Ok(Greeting {
                    author,
                    content,
                    date,
                })
            })
            .collect()
    }
}
