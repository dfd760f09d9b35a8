//! Record store split across logical submodules.

mod books;
mod connection;

pub use books::{add_book, delete_book, fetch_all_books, search_books};
pub use connection::open_catalog;
