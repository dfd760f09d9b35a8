//! Queries against the `books` table. Every function encapsulates one store
//! operation so the rest of the codebase can stay focused on UI state
//! management. Insertion order is carried by the autoincrement `id` column;
//! that id never leaves this module, because the catalog contract identifies
//! records by isbn alone.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Book;

/// Insert a new book at the logical end of the catalog. We echo the hydrated
/// struct so callers can update UI state without re-querying. No uniqueness
/// is enforced on any field; appending a duplicate isbn is allowed and the
/// operation cannot fail except on infrastructure errors.
pub fn add_book(
    conn: &Connection,
    title: &str,
    author: &str,
    year: &str,
    isbn: &str,
) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, year, isbn) VALUES (?1, ?2, ?3, ?4)",
        params![title, author, year, isbn],
    )
    .context("failed to insert book")?;

    Ok(Book {
        title: title.to_string(),
        author: author.to_string(),
        year: year.to_string(),
        isbn: isbn.to_string(),
    })
}

/// Retrieve every book in insertion order. The `ORDER BY id` clause is the
/// single source of truth for how the catalog is ordered everywhere in the
/// UI: search results and the table view both derive from it.
pub fn fetch_all_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare("SELECT title, author, year, isbn FROM books ORDER BY id")
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                title: row.get(0)?,
                author: row.get(1)?,
                year: row.get(2)?,
                isbn: row.get(3)?,
            })
        })
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Case-insensitive substring search across title, author, year, and isbn,
/// returning matches in insertion order. The match runs in Rust rather than
/// SQL because SQLite's `lower()` only folds ASCII, while `str::to_lowercase`
/// handles accented titles and authors correctly. A linear scan is fine at
/// the scale of a manually maintained catalog.
pub fn search_books(conn: &Connection, keyword: &str) -> Result<Vec<Book>> {
    let books = fetch_all_books(conn)?;
    Ok(books.into_iter().filter(|b| b.matches(keyword)).collect())
}

/// Remove the first book whose isbn equals `isbn` exactly. Unlike search,
/// the comparison is case-sensitive and whole-field (the TEXT column's BINARY
/// collation). `MIN(id)` pins the earliest entry when duplicates exist, so a
/// second call with the same key removes the next one. Returns whether a row
/// was removed; "not found" is a result, not an error.
pub fn delete_book(conn: &Connection, isbn: &str) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM books
             WHERE id = (SELECT MIN(id) FROM books WHERE isbn = ?1)",
            params![isbn],
        )
        .context("failed to delete book")?;

    Ok(deleted > 0)
}
