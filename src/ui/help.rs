use std::path::Path;

use ratatui::{
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::warn;

use super::{calculate_screen_chunks, draw_footer, draw_title, key_hints};
use crate::app::App;

pub const DEFAULT_HELP_TEXT: &str = "\
Decks
  Create a deck with n, then type questions and answers for it.
  Press Enter on a deck to study it, e to edit its cards, v for its statistics.

Studying
  Cards come in random order. Type the answer and press Enter to check it.
  Case and surrounding spaces do not matter. A wrong answer can be retried;
  Tab shows the correct answer. Every check counts as a review.
  Esc ends the session early and tells you how many cards are left.

Import and export
  x writes every deck to a JSON file, i adds the decks from a JSON file.
  A file with a malformed deck is rejected as a whole.

Statistics
  t shows the score and success rate of every deck.";

/// Help text from `path`, or the built-in text when no file is configured.
pub fn load_help_text(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return DEFAULT_HELP_TEXT.to_string();
    };

    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "help text unavailable");
            format!(
                "Help text file not found. Please ensure '{}' exists.",
                path.display()
            )
        }
    }
}

pub fn draw_help(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, "Help");

    let body = Paragraph::new(app.help_text.as_str())
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[("↑/↓", "Scroll"), ("Esc", "Back to Decks")])],
    );
}
