use ratatui::{
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{calculate_screen_chunks, draw_footer, draw_title, key_hints};
use crate::app::App;
use crate::utils::format_rate;

fn bold(text: String) -> Line<'static> {
    Line::from(text).style(Style::default().add_modifier(Modifier::BOLD))
}

fn scroll_hints() -> Vec<Line<'static>> {
    vec![key_hints(&[("↑/↓", "Scroll"), ("Esc", "Back to Decks")])]
}

/// Totals across the whole library followed by one block per deck.
pub fn draw_statistics(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, "Overall Statistics");

    let library = &app.library;
    let mut text = Text::default();
    text.push_line(bold(format!("Total Score: {}", library.total_score())));
    text.push_line(bold(format!(
        "Success Rate: {}",
        format_rate(library.success_rate())
    )));
    text.push_line(Line::from(""));

    for deck in library.decks() {
        text.push_line(bold(format!("Deck: {}", deck.title)));
        text.push_line(Line::from(format!("  Score: {}", deck.total_score())));
        text.push_line(Line::from(format!(
            "  Success Rate: {}",
            format_rate(deck.success_rate())
        )));
        text.push_line(Line::from(""));
    }

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_footer(f, layout.footer_area, scroll_hints());
}

pub fn draw_deck_statistics(f: &mut Frame, app: &App, deck: usize) {
    let layout = calculate_screen_chunks(f.area());
    let Ok(deck) = app.library.deck(deck) else {
        return;
    };
    draw_title(f, layout.header_area, &format!("Statistics: {}", deck.title));

    let mut text = Text::default();
    text.push_line(bold(format!("Total Score: {}", deck.total_score())));
    text.push_line(bold(format!(
        "Success Rate: {}",
        format_rate(deck.success_rate())
    )));
    text.push_line(Line::from(""));

    for card in &deck.cards {
        text.push_line(bold(format!("Q: {}", card.front)));
        text.push_line(Line::from(format!("  A: {}", card.back)));
        text.push_line(Line::from(format!("  Reviewed: {} times", card.review_count)));
        text.push_line(Line::from(format!("  Correct: {} times", card.correct_count)));
        text.push_line(Line::from(format!(
            "  Success Rate: {}",
            format_rate(card.success_rate())
        )));
        text.push_line(Line::from(""));
    }

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_footer(f, layout.footer_area, scroll_hints());
}
