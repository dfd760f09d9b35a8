//! Shared helpers for the integration tests.

use rusqlite::Connection;

use library_catalog_manager::{add_book, Book};

/// Append a book without the ceremony of naming every argument at the call
/// site. Panics on infrastructure errors, which tests treat as fatal.
pub fn add(conn: &Connection, title: &str, author: &str, year: &str, isbn: &str) -> Book {
    add_book(conn, title, author, year, isbn).expect("append should always succeed")
}
