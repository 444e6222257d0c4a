use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::DeckError;
use crate::input::TextInput;
use crate::models::{Card, Deck};

/// What the learner sees under the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Pending,
    Correct,
    Incorrect,
    Revealed,
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyAction {
    Stay,
    Completed,
    EndRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reviewed: usize,
    pub total: usize,
    pub remaining: usize,
}

/// One pass over a deck in shuffled order. The session keeps positions into
/// the deck rather than copies of cards, so review outcomes land on the
/// deck's own cards.
#[derive(Debug, Clone)]
pub struct StudySession {
    pub deck_index: usize,
    order: Vec<usize>,
    position: usize,
    reviewed: usize,
    pub feedback: Feedback,
    pub input: TextInput,
}

impl StudySession {
    /// Start a session over `deck`. Empty decks have nothing to study.
    pub fn start<R: Rng + ?Sized>(deck_index: usize, deck: &Deck, rng: &mut R) -> Option<Self> {
        if deck.is_empty() {
            return None;
        }

        let mut order: Vec<usize> = (0..deck.len()).collect();
        order.shuffle(rng);
        debug!(deck = %deck.title, cards = order.len(), "study session started");

        Some(Self {
            deck_index,
            order,
            position: 0,
            reviewed: 0,
            feedback: Feedback::Pending,
            input: TextInput::new(),
        })
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
        self.position = 0;
        self.reviewed = 0;
        self.reset_card_state();
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Position in the deck of the card on screen.
    pub fn current_card_index(&self) -> usize {
        self.order[self.position]
    }

    pub fn current_card<'d>(&self, deck: &'d Deck) -> Result<&'d Card, DeckError> {
        deck.card(self.current_card_index())
    }

    pub fn is_complete(&self) -> bool {
        self.reviewed >= self.order.len()
    }

    pub fn summary(&self) -> SessionSummary {
        let total = self.order.len();
        let reviewed = self.reviewed.min(total);
        SessionSummary {
            reviewed,
            total,
            remaining: total - reviewed,
        }
    }

    /// Compare the typed answer with the card's back and record the outcome
    /// on the deck. Every check is a review, so retrying after a wrong answer
    /// counts again.
    pub fn check_answer(&mut self, deck: &mut Deck) -> Result<Feedback, DeckError> {
        let card = deck.card_mut(self.current_card_index())?;
        if answers_match(self.input.value(), &card.back) {
            card.mark_correct();
            self.feedback = Feedback::Correct;
        } else {
            card.mark_incorrect();
            self.feedback = Feedback::Incorrect;
        }
        debug!(card = self.current_card_index(), feedback = ?self.feedback, "answer checked");
        Ok(self.feedback)
    }

    pub fn reveal_answer(&mut self) {
        self.feedback = Feedback::Revealed;
    }

    /// Count the current card as reviewed and move on, wrapping to the first
    /// card after the last one.
    pub fn next_card(&mut self) {
        self.reviewed += 1;
        if self.position + 1 < self.order.len() {
            self.position += 1;
        } else {
            self.position = 0;
        }
        self.reset_card_state();
    }

    pub fn previous_card(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.reviewed = self.reviewed.saturating_sub(1);
        }
        self.reset_card_state();
    }

    fn reset_card_state(&mut self) {
        self.feedback = Feedback::Pending;
        self.input.clear();
    }
}

/// Answers match when they are equal ignoring case and surrounding
/// whitespace.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

pub fn handle_study_input(
    session: &mut StudySession,
    deck: &mut Deck,
    key: KeyEvent,
) -> Result<StudyAction, DeckError> {
    match key.code {
        KeyCode::Esc => return Ok(StudyAction::EndRequested),
        KeyCode::Up | KeyCode::PageUp => {
            session.previous_card();
            return Ok(StudyAction::Stay);
        }
        KeyCode::Down | KeyCode::PageDown => return Ok(advance(session)),
        _ => {}
    }

    match session.feedback {
        Feedback::Pending | Feedback::Incorrect => match key.code {
            KeyCode::Enter => {
                if !session.input.is_blank() {
                    session.check_answer(deck)?;
                }
            }
            KeyCode::Tab => session.reveal_answer(),
            _ => {
                session.input.handle_key(key);
            }
        },
        Feedback::Correct | Feedback::Revealed => {
            if key.code == KeyCode::Enter {
                return Ok(advance(session));
            }
        }
    }

    Ok(StudyAction::Stay)
}

fn advance(session: &mut StudySession) -> StudyAction {
    session.next_card();
    if session.is_complete() {
        debug!(reviewed = session.reviewed, "study session completed");
        StudyAction::Completed
    } else {
        StudyAction::Stay
    }
}
