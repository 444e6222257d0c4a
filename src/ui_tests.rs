#[cfg(test)]
mod ui_render_tests {
    use crate::app::{App, Dialog, FileAction, Screen};
    use crate::config::Config;
    use crate::library::Library;
    use crate::models::Deck;
    use crate::session::{Feedback, StudySession};
    use crate::ui::draw;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::Path;

    fn sample_library() -> Library {
        let mut capitals = Deck::new("Capitals");
        capitals.add_card("France", "Paris");
        capitals.add_card("Japan", "Tokyo");
        capitals.cards[0].mark_correct();
        capitals.cards[0].mark_correct();
        capitals.cards[0].mark_incorrect();

        let mut verbs = Deck::new("Verbs");
        verbs.add_card("to be", "ser");
        Library::from_decks(vec![capitals, verbs])
    }

    fn sample_app() -> App {
        let config = Config::defaults(Path::new("/nonexistent/flashdeck"));
        App::with_rng(sample_library(), config, StdRng::seed_from_u64(11))
    }

    /// Render one frame and return the screen as text, one row per line.
    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn start_study(app: &mut App, deck: usize) {
        app.start_learning(deck);
        assert_eq!(app.screen, Screen::Study);
    }

    #[test]
    fn test_deck_manager_lists_decks() {
        let screen = render(&sample_app());

        assert!(screen.contains("Your Decks"));
        assert!(screen.contains("Capitals (2 cards)"));
        assert!(screen.contains("Verbs (1 cards)"));
    }

    #[test]
    fn test_deck_manager_empty_library() {
        let mut app = sample_app();
        app.library = Library::new();
        let screen = render(&app);

        assert!(screen.contains("No decks yet"));
    }

    #[test]
    fn test_new_deck_prompt_shows_typed_title() {
        let mut app = sample_app();
        app.screen = Screen::NewDeck;
        app.line_input = crate::input::TextInput::with_value("Rivers");
        let screen = render(&app);

        assert!(screen.contains("Create New Deck"));
        assert!(screen.contains("Rivers"));
    }

    #[test]
    fn test_add_cards_form_and_status() {
        let mut app = sample_app();
        app.screen = Screen::AddCards {
            deck: 1,
            from_editor: false,
        };
        app.status = Some(crate::app::Status {
            text: "Please fill in both question and answer.".to_string(),
            is_error: true,
        });
        let screen = render(&app);

        assert!(screen.contains("Add Cards to Verbs"));
        assert!(screen.contains("Question"));
        assert!(screen.contains("Answer"));
        assert!(screen.contains("Please fill in both question and answer."));
    }

    #[test]
    fn test_card_editor_lists_cards() {
        let mut app = sample_app();
        app.screen = Screen::CardEditor { deck: 0 };
        let screen = render(&app);

        assert!(screen.contains("Editing: Capitals"));
        assert!(screen.contains("Q: France"));
        assert!(screen.contains("A: Tokyo"));
    }

    #[test]
    fn test_study_screen_shows_question_and_feedback() {
        let mut app = sample_app();
        start_study(&mut app, 0);

        let question = {
            let session = app.session.as_ref().unwrap();
            let deck = app.library.deck(0).unwrap();
            session.current_card(deck).unwrap().front.clone()
        };
        let screen = render(&app);
        assert!(screen.contains("Capitals - Card 1 / 2"));
        assert!(screen.contains(&question));

        app.session.as_mut().unwrap().feedback = Feedback::Incorrect;
        assert!(render(&app).contains("Incorrect. Try again or show the answer."));

        app.session.as_mut().unwrap().reveal_answer();
        assert!(render(&app).contains("The correct answer is:"));
    }

    #[test]
    fn test_session_ended_early_reports_progress() {
        let mut app = sample_app();
        start_study(&mut app, 0);
        app.session.as_mut().unwrap().next_card();
        app.screen = Screen::SessionEnded { completed: false };
        let screen = render(&app);

        assert!(screen.contains("You have reviewed 1 out of 2 cards."));
        assert!(screen.contains("Quit Anyways"));
        assert!(screen.contains("Continue Learning"));
    }

    #[test]
    fn test_session_completed_message() {
        let mut app = sample_app();
        app.session = StudySession::start(1, app.library.deck(1).unwrap(), &mut StdRng::seed_from_u64(1));
        app.screen = Screen::SessionEnded { completed: true };

        assert!(render(&app).contains("Congratulations! You have reviewed all cards in this deck!"));
    }

    #[test]
    fn test_empty_deck_screen() {
        let mut app = sample_app();
        app.screen = Screen::EmptyDeck { deck: 0 };
        let screen = render(&app);

        assert!(screen.contains("This deck has no cards. Would you like to add some cards?"));
        assert!(screen.contains("Add Cards"));
    }

    #[test]
    fn test_overall_statistics() {
        let mut app = sample_app();
        app.screen = Screen::Statistics;
        let screen = render(&app);

        assert!(screen.contains("Overall Statistics"));
        assert!(screen.contains("Total Score: 2"));
        assert!(screen.contains("Success Rate: 66.67%"));
        assert!(screen.contains("Deck: Verbs"));
        assert!(screen.contains("Success Rate: 0.00%"));
    }

    #[test]
    fn test_deck_statistics_per_card() {
        let mut app = sample_app();
        app.screen = Screen::DeckStatistics { deck: 0 };
        let screen = render(&app);

        assert!(screen.contains("Statistics: Capitals"));
        assert!(screen.contains("Q: France"));
        assert!(screen.contains("Reviewed: 3 times"));
        assert!(screen.contains("Correct: 2 times"));
        assert!(screen.contains("Success Rate: 66.67%"));
    }

    #[test]
    fn test_help_screen() {
        let mut app = sample_app();
        app.help_text = "Study hard.".to_string();
        app.screen = Screen::Help;

        assert!(render(&app).contains("Study hard."));
    }

    #[test]
    fn test_confirm_dialog_overlays_screen() {
        let mut app = sample_app();
        app.dialog = Some(Dialog::Confirm {
            title: "Quit".to_string(),
            body: "Do you want to quit?".to_string(),
            on_yes: crate::app::Confirmed::Quit,
        });
        let screen = render(&app);

        assert!(screen.contains("Do you want to quit?"));
        assert!(screen.contains("Yes"));
        assert!(screen.contains("Your Decks"));
    }

    #[test]
    fn test_error_dialog() {
        let mut app = sample_app();
        app.show_message("Import Error", "The selected file is not a valid JSON file.");
        let screen = render(&app);

        assert!(screen.contains("Import Error"));
        assert!(screen.contains("not a valid JSON file"));
    }

    #[test]
    fn test_path_prompt() {
        let mut app = sample_app();
        app.screen = Screen::PathPrompt {
            action: FileAction::Import,
        };
        app.line_input = crate::input::TextInput::with_value("/tmp/decks.json");
        let screen = render(&app);

        assert!(screen.contains("Import Decks"));
        assert!(screen.contains("/tmp/decks.json"));
    }
}
