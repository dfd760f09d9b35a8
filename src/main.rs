//! Binary entry point that glues the in-memory record store to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we open the empty catalog, hydrate the initial app
//! state, and drive the Ratatui event loop until the user exits. Nothing is
//! persisted; closing the program discards the catalog.
use library_catalog_manager::{fetch_all_books, open_catalog, run_app, App};

/// Open the catalog, load the (initially empty) book list, and launch the
/// Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// a terminal that cannot enter raw mode) to stderr instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let conn = open_catalog()?;
    let books = fetch_all_books(&conn)?;

    let mut app = App::new(conn, books);
    run_app(&mut app)
}
