//! Ratatui front-end split across logical submodules: the `App` state
//! machine, the entry form, the catalog table, and the terminal lifecycle.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
