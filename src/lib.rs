pub mod app;
pub mod config;
pub mod error;
pub mod file_io;
pub mod input;
pub mod library;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::{App, Screen};
pub use config::Config;
pub use error::{DeckError, FileError};
pub use file_io::{export_decks, import_decks, load_library, save_library};
pub use library::Library;
pub use models::{Card, Deck};
pub use session::{handle_study_input, StudySession};
pub use ui::draw;
