use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{calculate_study_chunks, draw_footer, draw_input, key_hints, key_style};
use crate::app::App;
use crate::session::Feedback;

pub fn draw_study(f: &mut Frame, app: &App) {
    let layout = calculate_study_chunks(f.area());

    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Ok(deck) = app.library.deck(session.deck_index) else {
        return;
    };
    let Ok(card) = session.current_card(deck) else {
        return;
    };

    let progress = format!(
        "{} - Card {} / {} - Reviewed {}",
        deck.title,
        session.position() + 1,
        session.total(),
        session.reviewed()
    );
    let header = Paragraph::new(progress)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question = Paragraph::new(card.front.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    let answering = matches!(session.feedback, Feedback::Pending | Feedback::Incorrect);
    draw_input(f, layout.answer_area, "Your Answer", &session.input, answering);

    let (message, color) = match session.feedback {
        Feedback::Pending => (String::new(), Color::White),
        Feedback::Correct => ("Correct!".to_string(), Color::Green),
        Feedback::Incorrect => (
            "Incorrect. Try again or show the answer.".to_string(),
            Color::Red,
        ),
        Feedback::Revealed => (format!("The correct answer is: {}", card.back), Color::Blue),
    };
    let feedback = Paragraph::new(message)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, layout.feedback_area);

    let first = if answering {
        key_hints(&[("Enter", "Check Answer"), ("Tab", "Show Answer")])
    } else {
        key_hints(&[("Enter", "Continue")])
    };
    let second = key_hints(&[
        ("↑", "Previous"),
        ("↓", "Next"),
        ("Esc", "End Session"),
        ("Ctrl+C", "Exit App"),
    ]);
    draw_footer(f, layout.help_area, vec![first, second]);
}
