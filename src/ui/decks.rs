use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::{calculate_screen_chunks, draw_footer, draw_title, key_hints};
use crate::app::App;
use crate::utils::truncate_string;

pub fn draw_deck_manager(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());

    draw_title(f, layout.header_area, "Your Decks");

    let name_width = (layout.body_area.width as usize).saturating_sub(16);
    let items: Vec<ListItem> = if app.library.is_empty() {
        vec![ListItem::new("No decks yet. Press n to create one.").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.library
            .decks()
            .iter()
            .enumerate()
            .map(|(i, deck)| {
                let text = format!(
                    "{} ({} cards)",
                    truncate_string(&deck.title, name_width),
                    deck.len()
                );
                let style = if i == app.selected_deck {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, layout.body_area);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[
            ("↑/↓", "Navigate"),
            ("Enter", "Study"),
            ("n", "New"),
            ("e", "Edit"),
            ("v", "Stats"),
            ("d", "Delete"),
            ("x/i", "Export/Import"),
            ("t", "Statistics"),
            ("?", "Help"),
            ("q", "Exit"),
        ])],
    );
}
