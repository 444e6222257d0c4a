use std::path::PathBuf;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::config::Config;
use crate::error::DeckError;
use crate::file_io::{export_decks, import_decks, save_library};
use crate::input::TextInput;
use crate::library::Library;
use crate::session::{handle_study_input, StudyAction, StudySession};
use crate::ui::load_help_text;
use crate::utils::default_export_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Export,
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    DeckManager,
    NewDeck,
    AddCards { deck: usize, from_editor: bool },
    CardEditor { deck: usize },
    EditCard { deck: usize, card: usize },
    RenameDeck { deck: usize },
    EmptyDeck { deck: usize },
    Study,
    SessionEnded { completed: bool },
    Statistics,
    DeckStatistics { deck: usize },
    Help,
    PathPrompt { action: FileAction },
}

/// Action taken when a confirmation dialog is answered with yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmed {
    DeleteDeck(usize),
    DeleteCard { deck: usize, card: usize },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Message { title: String, body: String },
    Confirm { title: String, body: String, on_yes: Confirmed },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Front,
    Back,
}

/// Front/back entry used by both the add and the edit card screens.
#[derive(Debug, Clone)]
pub struct CardForm {
    pub front: TextInput,
    pub back: TextInput,
    pub focus: FormField,
}

impl CardForm {
    pub fn empty() -> Self {
        Self::filled("", "")
    }

    pub fn filled(front: &str, back: &str) -> Self {
        Self {
            front: TextInput::with_value(front),
            back: TextInput::with_value(back),
            focus: FormField::Front,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.front.is_blank() && !self.back.is_blank()
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            FormField::Front => &mut self.front,
            FormField::Back => &mut self.back,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Front => FormField::Back,
            FormField::Back => FormField::Front,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

/// Whole application state. The UI only ever reads it; every change goes
/// through [`App::handle_key`].
pub struct App {
    pub library: Library,
    pub config: Config,
    pub screen: Screen,
    pub dialog: Option<Dialog>,
    pub selected_deck: usize,
    pub selected_card: usize,
    pub line_input: TextInput,
    pub card_form: CardForm,
    pub session: Option<StudySession>,
    pub status: Option<Status>,
    pub help_text: String,
    pub scroll: u16,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(library: Library, config: Config) -> Self {
        Self::with_rng(library, config, StdRng::from_entropy())
    }

    pub fn with_rng(library: Library, config: Config, rng: StdRng) -> Self {
        Self {
            library,
            config,
            screen: Screen::DeckManager,
            dialog: None,
            selected_deck: 0,
            selected_card: 0,
            line_input: TextInput::new(),
            card_form: CardForm::empty(),
            session: None,
            status: None,
            help_text: String::new(),
            scroll: 0,
            should_quit: false,
            rng,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(dialog) = self.dialog.take() {
            self.handle_dialog_key(dialog, key);
            return;
        }

        let result = match self.screen {
            Screen::DeckManager => {
                self.handle_deck_manager_key(key);
                Ok(())
            }
            Screen::NewDeck => {
                self.handle_new_deck_key(key);
                Ok(())
            }
            Screen::AddCards { deck, from_editor } => self.handle_add_cards_key(deck, from_editor, key),
            Screen::CardEditor { deck } => self.handle_card_editor_key(deck, key),
            Screen::EditCard { deck, card } => self.handle_edit_card_key(deck, card, key),
            Screen::RenameDeck { deck } => self.handle_rename_key(deck, key),
            Screen::EmptyDeck { deck } => {
                self.handle_empty_deck_key(deck, key);
                Ok(())
            }
            Screen::Study => self.handle_study_key(key),
            Screen::SessionEnded { completed } => {
                self.handle_session_ended_key(completed, key);
                Ok(())
            }
            Screen::Statistics | Screen::DeckStatistics { .. } | Screen::Help => {
                self.handle_scroll_key(key);
                Ok(())
            }
            Screen::PathPrompt { action } => {
                self.handle_path_prompt_key(action, key);
                Ok(())
            }
        };

        // Positions come from bounded selections, so this only fires if the
        // library changed under a screen.
        if let Err(e) = result {
            error!(error = %e, screen = ?self.screen, "stale position");
            self.show_deck_manager();
            self.show_message("Error", e.to_string());
        }
    }

    /// Autosave the library, then hand back `restored`, the outcome of
    /// releasing the terminal. The save runs whatever that outcome was.
    pub fn shut_down(&self, restored: anyhow::Result<()>) -> anyhow::Result<()> {
        let saved = if self.config.autosave {
            save_library(&self.config.library_path, &self.library).with_context(|| {
                format!(
                    "could not save your decks to {}",
                    self.config.library_path.display()
                )
            })
        } else {
            Ok(())
        };

        if let Err(e) = &saved {
            error!(error = %e, "autosave failed");
        }
        restored.and(saved)
    }

    pub fn show_message(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.dialog = Some(Dialog::Message {
            title: title.into(),
            body: body.into(),
        });
    }

    fn confirm(&mut self, title: impl Into<String>, body: impl Into<String>, on_yes: Confirmed) {
        self.dialog = Some(Dialog::Confirm {
            title: title.into(),
            body: body.into(),
            on_yes,
        });
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(Status {
            text: text.into(),
            is_error,
        });
    }

    fn show_deck_manager(&mut self) {
        self.screen = Screen::DeckManager;
        self.session = None;
        self.status = None;
        self.selected_deck = self
            .selected_deck
            .min(self.library.len().saturating_sub(1));
    }

    fn show_card_editor(&mut self, deck: usize) -> Result<(), DeckError> {
        let len = self.library.deck(deck)?.len();
        self.selected_card = self.selected_card.min(len.saturating_sub(1));
        self.screen = Screen::CardEditor { deck };
        Ok(())
    }

    fn show_add_cards(&mut self, deck: usize, from_editor: bool) {
        self.card_form = CardForm::empty();
        self.status = None;
        self.screen = Screen::AddCards { deck, from_editor };
    }

    fn handle_dialog_key(&mut self, dialog: Dialog, key: KeyEvent) {
        match dialog {
            Dialog::Message { .. } => {
                if !matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.dialog = Some(dialog);
                }
            }
            Dialog::Confirm { on_yes, .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.apply_confirmed(on_yes),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.dialog = Some(dialog),
            },
        }
    }

    fn apply_confirmed(&mut self, action: Confirmed) {
        match action {
            Confirmed::DeleteDeck(index) => {
                if let Ok(deck) = self.library.remove_deck(index) {
                    info!(title = %deck.title, "deleted deck");
                }
                self.show_deck_manager();
            }
            Confirmed::DeleteCard { deck, card } => {
                let removed = self
                    .library
                    .deck_mut(deck)
                    .and_then(|d| d.delete_card(card));
                match removed {
                    Ok(_) => {
                        if self.show_card_editor(deck).is_err() {
                            self.show_deck_manager();
                        }
                    }
                    Err(e) => {
                        self.show_deck_manager();
                        self.show_message("Error", e.to_string());
                    }
                }
            }
            Confirmed::Quit => self.should_quit = true,
        }
    }

    fn handle_deck_manager_key(&mut self, key: KeyEvent) {
        let has_decks = !self.library.is_empty();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_deck = self.selected_deck.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_deck + 1 < self.library.len() {
                    self.selected_deck += 1;
                }
            }
            KeyCode::Char('n') => {
                self.line_input.clear();
                self.screen = Screen::NewDeck;
            }
            KeyCode::Enter | KeyCode::Char('s') if has_decks => self.start_learning(self.selected_deck),
            KeyCode::Char('e') if has_decks => {
                self.selected_card = 0;
                self.screen = Screen::CardEditor {
                    deck: self.selected_deck,
                };
            }
            KeyCode::Char('v') if has_decks => {
                self.scroll = 0;
                self.screen = Screen::DeckStatistics {
                    deck: self.selected_deck,
                };
            }
            KeyCode::Char('d') if has_decks => {
                let index = self.selected_deck;
                if let Ok(deck) = self.library.deck(index) {
                    let body = format!("Are you sure you want to delete the deck '{}'?", deck.title);
                    self.confirm("Delete Deck", body, Confirmed::DeleteDeck(index));
                }
            }
            KeyCode::Char('t') => {
                self.scroll = 0;
                self.screen = Screen::Statistics;
            }
            KeyCode::Char('x') => self.open_path_prompt(FileAction::Export),
            KeyCode::Char('i') => self.open_path_prompt(FileAction::Import),
            KeyCode::Char('?') | KeyCode::Char('h') => {
                self.help_text = load_help_text(self.config.help_path.as_deref());
                self.scroll = 0;
                self.screen = Screen::Help;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.confirm("Quit", "Do you want to quit?", Confirmed::Quit);
            }
            _ => {}
        }
    }

    fn handle_new_deck_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.show_deck_manager(),
            KeyCode::Enter => {
                if self.line_input.is_blank() {
                    return;
                }
                let title = self.line_input.value().trim().to_string();
                let index = self.library.add_deck(title.as_str());
                info!(%title, "created deck");
                self.selected_deck = index;
                self.show_add_cards(index, false);
            }
            _ => {
                self.line_input.handle_key(key);
            }
        }
    }

    fn handle_add_cards_key(&mut self, deck: usize, from_editor: bool, key: KeyEvent) -> Result<(), DeckError> {
        match key.code {
            KeyCode::Esc => {
                if self.card_form.is_complete() {
                    self.add_card_from_form(deck)?;
                }
                self.status = None;
                if from_editor {
                    self.show_card_editor(deck)?;
                } else {
                    self.show_deck_manager();
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.card_form.toggle_focus(),
            KeyCode::Enter => match self.card_form.focus {
                FormField::Front => self.card_form.focus = FormField::Back,
                FormField::Back => {
                    if self.card_form.is_complete() {
                        self.add_card_from_form(deck)?;
                        self.card_form = CardForm::empty();
                        self.set_status("Card added successfully!", false);
                    } else {
                        self.set_status("Please fill in both question and answer.", true);
                    }
                }
            },
            _ => {
                self.card_form.focused_mut().handle_key(key);
            }
        }
        Ok(())
    }

    fn add_card_from_form(&mut self, deck: usize) -> Result<(), DeckError> {
        let front = self.card_form.front.value().to_string();
        let back = self.card_form.back.value().to_string();
        self.library.deck_mut(deck)?.add_card(front, back);
        Ok(())
    }

    fn handle_card_editor_key(&mut self, deck: usize, key: KeyEvent) -> Result<(), DeckError> {
        let card_count = self.library.deck(deck)?.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.show_deck_manager(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_card + 1 < card_count {
                    self.selected_card += 1;
                }
            }
            KeyCode::Char('a') => self.show_add_cards(deck, true),
            KeyCode::Enter | KeyCode::Char('e') if card_count > 0 => {
                let card = self.library.deck(deck)?.card(self.selected_card)?;
                self.card_form = CardForm::filled(&card.front, &card.back);
                self.screen = Screen::EditCard {
                    deck,
                    card: self.selected_card,
                };
            }
            KeyCode::Char('d') if card_count > 0 => {
                self.confirm(
                    "Delete Card",
                    "Are you sure you want to delete this card?",
                    Confirmed::DeleteCard {
                        deck,
                        card: self.selected_card,
                    },
                );
            }
            KeyCode::Char('r') => {
                self.line_input = TextInput::with_value(self.library.deck(deck)?.title.as_str());
                self.screen = Screen::RenameDeck { deck };
            }
            KeyCode::Char('D') => {
                let body = format!(
                    "Are you sure you want to delete the deck '{}'?",
                    self.library.deck(deck)?.title
                );
                self.confirm("Confirm Deletion", body, Confirmed::DeleteDeck(deck));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_edit_card_key(&mut self, deck: usize, card: usize, key: KeyEvent) -> Result<(), DeckError> {
        match key.code {
            KeyCode::Esc => self.show_card_editor(deck)?,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.card_form.toggle_focus(),
            KeyCode::Enter => match self.card_form.focus {
                FormField::Front => self.card_form.focus = FormField::Back,
                FormField::Back => {
                    if self.card_form.is_complete() {
                        let front = self.card_form.front.value().to_string();
                        let back = self.card_form.back.value().to_string();
                        self.library.deck_mut(deck)?.edit_card(card, front, back)?;
                    }
                    self.show_card_editor(deck)?;
                }
            },
            _ => {
                self.card_form.focused_mut().handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_rename_key(&mut self, deck: usize, key: KeyEvent) -> Result<(), DeckError> {
        match key.code {
            KeyCode::Esc => self.show_card_editor(deck)?,
            KeyCode::Enter => {
                if !self.line_input.is_blank() {
                    let title = self.line_input.value().trim().to_string();
                    self.library.rename_deck(deck, title)?;
                }
                self.show_card_editor(deck)?;
            }
            _ => {
                self.line_input.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_empty_deck_key(&mut self, deck: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') | KeyCode::Enter => self.show_add_cards(deck, false),
            KeyCode::Esc | KeyCode::Char('b') => self.show_deck_manager(),
            _ => {}
        }
    }

    pub fn start_learning(&mut self, deck_index: usize) {
        let Ok(deck) = self.library.deck(deck_index) else {
            return;
        };

        match StudySession::start(deck_index, deck, &mut self.rng) {
            Some(session) => {
                self.session = Some(session);
                self.screen = Screen::Study;
            }
            None => self.screen = Screen::EmptyDeck { deck: deck_index },
        }
    }

    fn handle_study_key(&mut self, key: KeyEvent) -> Result<(), DeckError> {
        let Some(session) = self.session.as_mut() else {
            self.show_deck_manager();
            return Ok(());
        };
        let deck = self.library.deck_mut(session.deck_index)?;

        match handle_study_input(session, deck, key)? {
            StudyAction::Stay => {}
            StudyAction::Completed => self.screen = Screen::SessionEnded { completed: true },
            StudyAction::EndRequested => self.screen = Screen::SessionEnded { completed: false },
        }
        Ok(())
    }

    fn handle_session_ended_key(&mut self, completed: bool, key: KeyEvent) {
        match (completed, key.code) {
            (true, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m')) => self.show_deck_manager(),
            (true, KeyCode::Char('r')) => {
                if let Some(session) = self.session.as_mut() {
                    session.restart(&mut self.rng);
                    self.screen = Screen::Study;
                }
            }
            (false, KeyCode::Char('q')) => self.show_deck_manager(),
            (false, KeyCode::Char('c') | KeyCode::Enter | KeyCode::Esc) => self.screen = Screen::Study,
            _ => {}
        }
    }

    fn handle_scroll_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => self.show_deck_manager(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    fn open_path_prompt(&mut self, action: FileAction) {
        let path = match action {
            FileAction::Export => default_export_path(&self.config.export_dir, &chrono::Local::now()),
            FileAction::Import => self.config.export_dir.clone(),
        };
        self.line_input = TextInput::with_value(path.to_string_lossy());
        self.screen = Screen::PathPrompt { action };
    }

    fn handle_path_prompt_key(&mut self, action: FileAction, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.show_deck_manager(),
            KeyCode::Enter => {
                if self.line_input.is_blank() {
                    return;
                }
                let path = PathBuf::from(self.line_input.value().trim());
                self.show_deck_manager();
                match action {
                    FileAction::Export => self.export_to(path),
                    FileAction::Import => self.import_from(path),
                }
            }
            _ => {
                self.line_input.handle_key(key);
            }
        }
    }

    pub fn export_to(&mut self, path: PathBuf) {
        match export_decks(&path, self.library.decks()) {
            Ok(()) => self.show_message(
                "Export Successful",
                format!("Flashcard sets have been exported to {}", path.display()),
            ),
            Err(e) => {
                error!(path = %path.display(), error = %e, "export failed");
                self.show_message(e.title(), e.to_string());
            }
        }
    }

    pub fn import_from(&mut self, path: PathBuf) {
        match import_decks(&path) {
            Ok(decks) => {
                let count = decks.len();
                self.library.extend(decks);
                self.show_message(
                    "Import Successful",
                    format!("Imported {} deck(s) from {}", count, path.display()),
                );
            }
            Err(e) => self.show_message(e.title(), e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deck;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(key(*code));
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn test_app(library: Library) -> App {
        let config = Config::defaults(std::path::Path::new("/nonexistent/flashdeck"));
        App::with_rng(library, config, StdRng::seed_from_u64(3))
    }

    fn capitals_library() -> Library {
        let mut deck = Deck::new("Capitals");
        deck.add_card("France", "Paris");
        deck.add_card("Japan", "Tokyo");
        deck.add_card("Peru", "Lima");
        Library::from_decks(vec![deck])
    }

    #[test]
    fn test_create_deck_and_add_cards() {
        let mut app = test_app(Library::new());
        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.screen, Screen::NewDeck);

        type_text(&mut app, "Verbs");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(
            app.screen,
            Screen::AddCards {
                deck: 0,
                from_editor: false
            }
        );

        type_text(&mut app, "to be");
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "ser");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.status.as_ref().unwrap().text, "Card added successfully!");

        // Filled pair is kept when finishing.
        type_text(&mut app, "to have");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "tener");
        press(&mut app, &[KeyCode::Esc]);

        assert_eq!(app.screen, Screen::DeckManager);
        let deck = app.library.deck(0).unwrap();
        assert_eq!(deck.title, "Verbs");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards[1].back, "tener");
    }

    #[test]
    fn test_blank_deck_title_is_ignored() {
        let mut app = test_app(Library::new());
        press(&mut app, &[KeyCode::Char('n'), KeyCode::Char(' '), KeyCode::Enter]);
        assert_eq!(app.screen, Screen::NewDeck);
        assert!(app.library.is_empty());
    }

    #[test]
    fn test_incomplete_card_not_added() {
        let mut app = test_app(Library::new());
        app.library.add_deck("Empty");
        app.show_add_cards(0, false);

        type_text(&mut app, "Question only");
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);

        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(app.library.deck(0).unwrap().is_empty());
    }

    #[test]
    fn test_delete_deck_requires_confirmation() {
        let mut app = test_app(capitals_library());
        press(&mut app, &[KeyCode::Char('d')]);
        assert!(matches!(app.dialog, Some(Dialog::Confirm { .. })));

        press(&mut app, &[KeyCode::Char('n')]);
        assert!(app.dialog.is_none());
        assert_eq!(app.library.len(), 1);

        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char('y')]);
        assert!(app.library.is_empty());
        assert_eq!(app.selected_deck, 0);
    }

    #[test]
    fn test_edit_card_keeps_position_and_counters() {
        let mut library = capitals_library();
        library.deck_mut(0).unwrap().cards[1].mark_correct();
        let mut app = test_app(library);

        press(&mut app, &[KeyCode::Char('e'), KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.screen, Screen::EditCard { deck: 0, card: 1 });
        assert_eq!(app.card_form.front.value(), "Japan");

        press(&mut app, &[KeyCode::Enter]);
        for _ in 0.."Tokyo".len() {
            press(&mut app, &[KeyCode::Backspace]);
        }
        type_text(&mut app, "Kyoto");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.screen, Screen::CardEditor { deck: 0 });
        let card = &app.library.deck(0).unwrap().cards[1];
        assert_eq!(card.back, "Kyoto");
        assert_eq!(card.correct_count, 1);
    }

    #[test]
    fn test_delete_card_from_editor() {
        let mut app = test_app(capitals_library());
        press(&mut app, &[KeyCode::Char('e'), KeyCode::Char('j'), KeyCode::Char('j')]);
        press(&mut app, &[KeyCode::Char('d'), KeyCode::Enter]);

        let deck = app.library.deck(0).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards[1].front, "Japan");
        assert_eq!(app.selected_card, 1);
        assert_eq!(app.screen, Screen::CardEditor { deck: 0 });
    }

    #[test]
    fn test_rename_deck() {
        let mut app = test_app(capitals_library());
        press(&mut app, &[KeyCode::Char('e'), KeyCode::Char('r')]);
        assert_eq!(app.line_input.value(), "Capitals");

        type_text(&mut app, " of the world");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.library.deck(0).unwrap().title, "Capitals of the world");
    }

    #[test]
    fn test_study_empty_deck_offers_add_cards() {
        let mut library = Library::new();
        library.add_deck("Nothing");
        let mut app = test_app(library);

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen, Screen::EmptyDeck { deck: 0 });
        press(&mut app, &[KeyCode::Char('a')]);
        assert!(matches!(app.screen, Screen::AddCards { deck: 0, .. }));
    }

    #[test]
    fn test_full_study_session_records_reviews() {
        let mut app = test_app(capitals_library());
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Study);

        for _ in 0..3 {
            let index = app.session.as_ref().unwrap().current_card_index();
            let answer = app.library.deck(0).unwrap().cards[index].back.clone();
            type_text(&mut app, &answer.to_uppercase());
            press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);
        }

        assert_eq!(app.screen, Screen::SessionEnded { completed: true });
        let deck = app.library.deck(0).unwrap();
        assert_eq!(deck.total_score(), 3);
        assert_eq!(deck.total_reviews(), 3);

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen, Screen::DeckManager);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_end_session_early_and_continue() {
        let mut app = test_app(capitals_library());
        press(&mut app, &[KeyCode::Enter, KeyCode::Tab, KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(app.screen, Screen::SessionEnded { completed: false });
        assert_eq!(app.session.as_ref().unwrap().summary().remaining, 2);

        press(&mut app, &[KeyCode::Char('c')]);
        assert_eq!(app.screen, Screen::Study);

        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]);
        assert_eq!(app.screen, Screen::DeckManager);
    }

    #[test]
    fn test_export_and_import_through_prompt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut app = test_app(capitals_library());
        app.config.export_dir = dir.path().to_path_buf();

        press(&mut app, &[KeyCode::Char('x')]);
        assert_eq!(app.screen, Screen::PathPrompt { action: FileAction::Export });
        assert!(app.line_input.value().ends_with(".json"));

        app.line_input = TextInput::with_value(path.to_string_lossy());
        press(&mut app, &[KeyCode::Enter]);
        assert!(matches!(
            &app.dialog,
            Some(Dialog::Message { title, .. }) if title == "Export Successful"
        ));
        press(&mut app, &[KeyCode::Enter]);

        app.import_from(path);
        assert_eq!(app.library.len(), 2);
        assert_eq!(app.library.deck(1).unwrap(), app.library.deck(0).unwrap());
    }

    #[test]
    fn test_failed_import_leaves_library_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"title": "ok", "cards": []}, {"title": "no cards"}]"#).unwrap();

        let mut app = test_app(capitals_library());
        app.import_from(path);

        assert_eq!(app.library, capitals_library());
        assert!(matches!(
            &app.dialog,
            Some(Dialog::Message { title, .. }) if title == "Import Error"
        ));
    }

    #[test]
    fn test_quit_asks_first() {
        let mut app = test_app(Library::new());
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.should_quit);
        press(&mut app, &[KeyCode::Char('y')]);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = test_app(capitals_library());
        press(&mut app, &[KeyCode::Enter]);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_falls_back_to_builtin_text() {
        let mut app = test_app(Library::new());
        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.screen, Screen::Help);
        assert!(!app.help_text.is_empty());
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::DeckManager);
    }

    #[test]
    fn test_message_dialog_swallows_other_keys() {
        let mut app = test_app(capitals_library());
        app.show_message("Hello", "World");
        press(&mut app, &[KeyCode::Char('d')]);
        assert!(matches!(app.dialog, Some(Dialog::Message { .. })));
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.dialog.is_none());
        assert_eq!(app.library.len(), 1);
    }

    #[test]
    fn test_shut_down_saves_even_when_terminal_restore_failed() {
        let dir = tempdir().unwrap();
        let mut app = test_app(capitals_library());
        app.config.library_path = dir.path().join("library.json");

        let result = app.shut_down(Err(anyhow::anyhow!("failed to disable raw mode")));

        assert!(result.unwrap_err().to_string().contains("raw mode"));
        let saved = crate::file_io::load_library(&app.config.library_path).unwrap();
        assert_eq!(saved, capitals_library());
    }

    #[test]
    fn test_shut_down_reports_failed_save() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let mut app = test_app(capitals_library());
        app.config.library_path = blocker.join("library.json");

        let err = app.shut_down(Ok(())).unwrap_err();
        assert!(err.to_string().starts_with("could not save your decks"));
    }

    #[test]
    fn test_shut_down_without_autosave_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut app = test_app(capitals_library());
        app.config.library_path = dir.path().join("library.json");
        app.config.autosave = false;

        app.shut_down(Ok(())).unwrap();
        assert!(!app.config.library_path.exists());
    }
}
