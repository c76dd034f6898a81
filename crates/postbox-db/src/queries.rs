use crate::Database;
use crate::models::{MessageRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    /// Insert a new user. Returns `false` if the username is already taken;
    /// the check and the insert are a single statement.
    pub fn create_user(
        &self,
        username: &str,
        full_name: Option<&str>,
        password_hash: &str,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users (username, full_name, password_hash) VALUES (?1, ?2, ?3)",
                rusqlite::params![username, full_name, password_hash],
            )?;
            Ok(inserted == 1)
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Messages --

    pub fn insert_message(&self, id: &str, sender: &str, recipient: &str, text: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, sender, recipient, text) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, sender, recipient, text],
            )?;
            Ok(())
        })
    }

    /// All messages addressed to `recipient`, oldest first.
    pub fn get_messages_for_recipient(&self, recipient: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages_for_recipient(conn, recipient))
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT username, full_name, password_hash, created_at FROM users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                full_name: row.get(1)?,
                password_hash: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_messages_for_recipient(conn: &Connection, recipient: &str) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, sender, recipient, text, created_at
         FROM messages
         WHERE recipient = ?1
         ORDER BY seq ASC",
    )?;

    let rows = stmt
        .query_map([recipient], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                sender: row.get(1)?,
                recipient: row.get(2)?,
                text: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
