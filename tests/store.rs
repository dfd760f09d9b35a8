//! Integration tests for the record store contract: insertion-order
//! enumeration, case-insensitive substring search, and exact-match deletion
//! by isbn. Everything runs against a real in-memory catalog through the
//! public API.

mod common;

use common::add;
use library_catalog_manager::{delete_book, fetch_all_books, open_catalog, search_books, Book};
use rusqlite::Connection;

fn isbns(books: &[Book]) -> Vec<&str> {
    books.iter().map(|b| b.isbn.as_str()).collect()
}

/// The example record used throughout the catalog's documented behavior.
fn add_clean_code(conn: &Connection) -> Book {
    add(conn, "Clean Code", "Robert Martin", "2008", "111")
}

#[test]
fn new_catalog_is_empty() {
    let conn = open_catalog().unwrap();
    assert!(fetch_all_books(&conn).unwrap().is_empty());
}

#[test]
fn enumeration_preserves_insertion_order() {
    let conn = open_catalog().unwrap();
    add(&conn, "A", "a", "1990", "1");
    add(&conn, "B", "b", "1991", "2");
    add(&conn, "C", "c", "1992", "3");

    let books = fetch_all_books(&conn).unwrap();
    assert_eq!(isbns(&books), vec!["1", "2", "3"]);
}

#[test]
fn enumeration_is_idempotent_without_mutation() {
    let conn = open_catalog().unwrap();
    add_clean_code(&conn);
    add(&conn, "Refactoring", "Martin Fowler", "1999", "222");

    let first = fetch_all_books(&conn).unwrap();
    let second = fetch_all_books(&conn).unwrap();
    assert_eq!(first, second);
}

#[test]
fn search_matches_every_field_case_insensitively() {
    let conn = open_catalog().unwrap();
    let book = add_clean_code(&conn);

    for keyword in ["clean", "MARTIN", "2008", "111"] {
        let results = search_books(&conn, keyword).unwrap();
        assert_eq!(results, vec![book.clone()], "keyword {keyword:?}");
    }
}

#[test]
fn search_returns_empty_for_unmatched_keyword() {
    let conn = open_catalog().unwrap();
    add_clean_code(&conn);
    assert!(search_books(&conn, "xyz").unwrap().is_empty());
}

#[test]
fn search_results_keep_insertion_order() {
    let conn = open_catalog().unwrap();
    add(&conn, "Rust in Action", "Tim McNamara", "2021", "10");
    add(&conn, "The C Programming Language", "Kernighan", "1978", "20");
    add(&conn, "Programming Rust", "Blandy", "2021", "30");

    let results = search_books(&conn, "rust").unwrap();
    assert_eq!(isbns(&results), vec!["10", "30"]);
}

#[test]
fn delete_missing_isbn_returns_false_and_changes_nothing() {
    let conn = open_catalog().unwrap();
    add_clean_code(&conn);
    let before = fetch_all_books(&conn).unwrap();

    assert!(!delete_book(&conn, "999").unwrap());
    assert_eq!(fetch_all_books(&conn).unwrap(), before);
}

#[test]
fn delete_removes_first_duplicate_then_the_next() {
    let conn = open_catalog().unwrap();
    add(&conn, "First Edition", "Author", "1999", "dup");
    add(&conn, "Second Edition", "Author", "2004", "dup");

    assert!(delete_book(&conn, "dup").unwrap());
    let remaining = fetch_all_books(&conn).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Second Edition");

    assert!(delete_book(&conn, "dup").unwrap());
    assert!(fetch_all_books(&conn).unwrap().is_empty());
    assert!(!delete_book(&conn, "dup").unwrap());
}

#[test]
fn delete_is_exact_and_case_sensitive_while_search_is_not() {
    let conn = open_catalog().unwrap();
    add(&conn, "Title", "Author", "2000", "ABC123");

    // The same key that search happily matches in any case and as a
    // substring leaves delete untouched unless it is byte-for-byte equal.
    assert_eq!(search_books(&conn, "abc123").unwrap().len(), 1);
    assert_eq!(search_books(&conn, "bc12").unwrap().len(), 1);
    assert!(!delete_book(&conn, "abc123").unwrap());
    assert!(!delete_book(&conn, "ABC12").unwrap());
    assert!(delete_book(&conn, "ABC123").unwrap());
}

#[test]
fn duplicate_isbns_are_allowed_on_append() {
    let conn = open_catalog().unwrap();
    add(&conn, "Copy One", "Author", "2000", "same");
    add(&conn, "Copy Two", "Author", "2000", "same");
    assert_eq!(fetch_all_books(&conn).unwrap().len(), 2);
}

#[test]
fn append_delete_scenario_end_to_end() {
    let conn = open_catalog().unwrap();
    add(&conn, "A", "a", "1990", "1");
    add(&conn, "A", "a", "1991", "2");
    add(&conn, "A", "a", "1992", "3");
    assert_eq!(isbns(&fetch_all_books(&conn).unwrap()), vec!["1", "2", "3"]);

    assert!(delete_book(&conn, "2").unwrap());
    assert_eq!(isbns(&fetch_all_books(&conn).unwrap()), vec!["1", "3"]);
    assert!(!delete_book(&conn, "2").unwrap());
    assert_eq!(isbns(&fetch_all_books(&conn).unwrap()), vec!["1", "3"]);
}
