//! Core library surface for the Library Catalog Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.
//! Keeping the glue logic documented makes it easy to recall why each
//! re-export exists when revisiting the project.
pub mod models;
pub mod store;
pub mod ui;

/// Convenience re-exports for the record store. These functions are typically
/// used by `main.rs` to bring up the in-memory catalog, and by tests to
/// exercise the store contract directly.
pub use store::{add_book, delete_book, fetch_all_books, open_catalog, search_books};

/// The domain type the other layers manipulate.
pub use models::Book;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
