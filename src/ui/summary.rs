use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{calculate_screen_chunks, draw_footer, draw_title, key_hints};
use crate::app::App;

pub fn draw_session_ended(f: &mut Frame, app: &App, completed: bool) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, "Session Ended");

    let mut text = Text::default();
    text.push_line(Line::from(""));
    if completed {
        text.push_line(Line::from("Congratulations! You have reviewed all cards in this deck!").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    } else if let Some(session) = &app.session {
        let summary = session.summary();
        text.push_line(Line::from(format!(
            "You have reviewed {} out of {} cards. There are {} cards left to review.",
            summary.reviewed, summary.total, summary.remaining
        )));
    }

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    let hints = if completed {
        key_hints(&[("Enter", "Return to Main Menu"), ("r", "Study Again")])
    } else {
        key_hints(&[("q", "Quit Anyways"), ("c", "Continue Learning")])
    };
    draw_footer(f, layout.footer_area, vec![hints]);
}

pub fn draw_empty_deck(f: &mut Frame) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area, "Empty Deck");

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from("This deck has no cards. Would you like to add some cards?"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[("a", "Add Cards"), ("Esc", "Back to Decks")])],
    );
}
