use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{calculate_screen_chunks, centered_rect, draw_footer, draw_input, draw_title, key_hints};
use crate::app::{App, Dialog, FileAction};

/// Popup over whatever screen is underneath.
pub fn draw_dialog(f: &mut Frame, dialog: &Dialog) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let (title, body, border, hints) = match dialog {
        Dialog::Message { title, body } => (
            title,
            body,
            Color::Cyan,
            Line::from(vec![
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::from(" OK"),
            ]),
        ),
        Dialog::Confirm { title, body, .. } => (
            title,
            body,
            Color::Yellow,
            Line::from(vec![
                Span::styled(
                    "y",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::from(" Yes  "),
                Span::styled(
                    "n",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::from(" No"),
            ]),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(body.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let help = Paragraph::new(hints).alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);
}

/// File path entry used in place of a file picker.
pub fn draw_path_prompt(f: &mut Frame, app: &App, action: FileAction) {
    let layout = calculate_screen_chunks(f.area());
    let (title, hint) = match action {
        FileAction::Export => ("Export Decks", "Export"),
        FileAction::Import => ("Import Decks", "Import"),
    };
    draw_title(f, layout.header_area, title);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(layout.body_area);
    draw_input(f, chunks[0], "JSON File", &app.line_input, true);

    draw_footer(
        f,
        layout.footer_area,
        vec![key_hints(&[("Enter", hint), ("Esc", "Cancel")])],
    );
}
