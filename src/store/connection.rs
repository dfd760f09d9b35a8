use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open the catalog database and create its schema, returning a live
/// connection. The database lives entirely in memory: it starts empty on
/// every launch, is owned by the process for its lifetime, and leaves nothing
/// behind on exit. There is no file path to resolve and no migration history
/// to replay.
pub fn open_catalog() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;

    // `year` is TEXT, not INTEGER: the catalog never computes with it, and
    // text admits entries a numeric column would reject.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year TEXT NOT NULL,
            isbn TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create books table")?;

    Ok(conn)
}
