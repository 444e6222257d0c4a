use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::{calculate_screen_chunks, draw_footer, draw_input, draw_title, key_hints};
use crate::app::{App, FormField};
use crate::utils::truncate_string;

fn deck_title(app: &App, deck: usize) -> &str {
    app.library
        .deck(deck)
        .map(|d| d.title.as_str())
        .unwrap_or_default()
}

pub fn draw_new_deck(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, "Create New Deck");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(layout.body_area);
    draw_input(f, chunks[0], "Deck Title", &app.line_input, true);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[("Enter", "Create Deck"), ("Esc", "Cancel")])],
    );
}

pub fn draw_rename_deck(f: &mut Frame, app: &App, deck: usize) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, &format!("Rename: {}", deck_title(app, deck)));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(layout.body_area);
    draw_input(f, chunks[0], "New Title", &app.line_input, true);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[("Enter", "Save"), ("Esc", "Cancel")])],
    );
}

/// Question/answer form shared by adding and editing cards.
pub fn draw_card_form(f: &mut Frame, app: &App, deck: usize, editing: bool) {
    let layout = calculate_screen_chunks(f.area());
    let title = if editing {
        format!("Edit Card in {}", deck_title(app, deck))
    } else {
        format!("Add Cards to {}", deck_title(app, deck))
    };
    draw_title(f, layout.header_area, &title);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(layout.body_area);

    let form = &app.card_form;
    draw_input(f, chunks[0], "Question", &form.front, form.focus == FormField::Front);
    draw_input(f, chunks[1], "Answer", &form.back, form.focus == FormField::Back);

    if let Some(status) = &app.status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        let line = Paragraph::new(status.text.clone()).style(Style::default().fg(color));
        f.render_widget(line, chunks[2]);
    }

    let hints = if editing {
        key_hints(&[("Tab", "Switch Field"), ("Enter", "Next/Save Changes"), ("Esc", "Cancel")])
    } else {
        key_hints(&[("Tab", "Switch Field"), ("Enter", "Next/Add Card"), ("Esc", "Finish Adding Cards")])
    };
    draw_footer(f, layout.footer_area, vec![hints]);
}

pub fn draw_card_editor(f: &mut Frame, app: &App, deck: usize) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, &format!("Editing: {}", deck_title(app, deck)));

    let width = (layout.body_area.width as usize).saturating_sub(8);
    let cards = app.library.deck(deck).map(|d| d.cards.as_slice()).unwrap_or_default();

    let items: Vec<ListItem> = if cards.is_empty() {
        vec![ListItem::new("This deck has no cards. Press a to add one.").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let selected = i == app.selected_card;
                let style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(vec![
                    Line::from(format!("Q: {}", truncate_string(&card.front, width))),
                    Line::from(format!("   A: {}", truncate_string(&card.back, width))),
                ])
                .style(style)
            })
            .collect()
    };

    // Keep the selected card on screen; every card takes two rows.
    let visible = (layout.body_area.height.saturating_sub(2) / 2).max(1) as usize;
    let skip = app.selected_card.saturating_sub(visible - 1);
    let items: Vec<ListItem> = items.into_iter().skip(skip).collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("{} cards", cards.len())),
    );
    f.render_widget(list, layout.body_area);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[
            ("↑/↓", "Navigate"),
            ("a", "Add"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("r", "Rename"),
            ("D", "Delete Deck"),
            ("Esc", "Back to Decks"),
        ])],
    );
}
