pub mod layout;
mod decks;
mod dialog;
mod editor;
mod help;
mod stats;
mod study;
mod summary;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::input::TextInput;

pub use help::{load_help_text, DEFAULT_HELP_TEXT};
pub use layout::{calculate_screen_chunks, calculate_study_chunks, centered_rect};

/// Render the current screen and any open dialog on top of it.
pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::DeckManager => decks::draw_deck_manager(f, app),
        Screen::NewDeck => editor::draw_new_deck(f, app),
        Screen::AddCards { deck, .. } => editor::draw_card_form(f, app, deck, false),
        Screen::CardEditor { deck } => editor::draw_card_editor(f, app, deck),
        Screen::EditCard { deck, .. } => editor::draw_card_form(f, app, deck, true),
        Screen::RenameDeck { deck } => editor::draw_rename_deck(f, app, deck),
        Screen::EmptyDeck { .. } => summary::draw_empty_deck(f),
        Screen::Study => study::draw_study(f, app),
        Screen::SessionEnded { completed } => summary::draw_session_ended(f, app, completed),
        Screen::Statistics => stats::draw_statistics(f, app),
        Screen::DeckStatistics { deck } => stats::draw_deck_statistics(f, app, deck),
        Screen::Help => help::draw_help(f, app),
        Screen::PathPrompt { action } => dialog::draw_path_prompt(f, app, action),
    }

    if let Some(dialog) = &app.dialog {
        dialog::draw_dialog(f, dialog);
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Footer line of `key action` pairs.
fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, key_style()));
        if i + 1 < hints.len() {
            spans.push(Span::from(format!(" {}  ", action)));
        } else {
            spans.push(Span::from(format!(" {}", action)));
        }
    }
    Line::from(spans)
}

fn draw_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

/// Bordered single-line field. The terminal cursor is placed only in the
/// focused field.
fn draw_input(f: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor = input.cursor_width();
    let offset = cursor.saturating_sub(inner_width.saturating_sub(1));

    let field = Paragraph::new(input.value().to_string())
        .scroll((0, offset as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );
    f.render_widget(field, area);

    if focused {
        let x = area.x + 1 + (cursor - offset) as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_footer(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let help = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
