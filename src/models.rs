use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{check_index, DeckError, FileError};

/// A single question/answer pair with its review history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub correct_count: u32,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            review_count: 0,
            correct_count: 0,
        }
    }

    pub fn set_text(&mut self, front: impl Into<String>, back: impl Into<String>) {
        self.front = front.into();
        self.back = back.into();
    }

    /// Counters saturate at `u32::MAX`; `correct_count` never passes
    /// `review_count`.
    pub fn mark_correct(&mut self) {
        self.review_count = self.review_count.saturating_add(1);
        self.correct_count = self.correct_count.saturating_add(1);
    }

    pub fn mark_incorrect(&mut self) {
        self.review_count = self.review_count.saturating_add(1);
    }

    /// Percentage of reviews answered correctly, unrounded. Zero before the
    /// first review.
    pub fn success_rate(&self) -> f64 {
        if self.review_count == 0 {
            return 0.0;
        }
        f64::from(self.correct_count) / f64::from(self.review_count) * 100.0
    }

    fn to_serializable(&self) -> Value {
        json!({
            "front": self.front,
            "back": self.back,
            "review_count": self.review_count,
            "correct_count": self.correct_count,
        })
    }
}

/// A titled, ordered collection of cards. Card positions are dense, so
/// deleting a card shifts everything after it down by one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deck {
    pub title: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cards: Vec::new(),
        }
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Result<&Card, DeckError> {
        check_index(index, self.cards.len())?;
        Ok(&self.cards[index])
    }

    pub fn card_mut(&mut self, index: usize) -> Result<&mut Card, DeckError> {
        check_index(index, self.cards.len())?;
        Ok(&mut self.cards[index])
    }

    pub fn add_card(&mut self, front: impl Into<String>, back: impl Into<String>) {
        self.cards.push(Card::new(front, back));
    }

    /// Replace the text of the card at `index`. Review counters are kept.
    pub fn edit_card(
        &mut self,
        index: usize,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Result<(), DeckError> {
        self.card_mut(index)?.set_text(front, back);
        Ok(())
    }

    pub fn delete_card(&mut self, index: usize) -> Result<Card, DeckError> {
        check_index(index, self.cards.len())?;
        Ok(self.cards.remove(index))
    }

    /// Sum of correct answers across all cards.
    pub fn total_score(&self) -> u64 {
        self.cards
            .iter()
            .map(|card| u64::from(card.correct_count))
            .sum()
    }

    pub fn total_reviews(&self) -> u64 {
        self.cards
            .iter()
            .map(|card| u64::from(card.review_count))
            .sum()
    }

    pub fn success_rate(&self) -> f64 {
        rate(self.total_score(), self.total_reviews())
    }

    pub fn to_serializable(&self) -> Value {
        json!({
            "title": self.title,
            "cards": self.cards.iter().map(Card::to_serializable).collect::<Vec<_>>(),
        })
    }

    /// Build a deck from a record produced by [`Deck::to_serializable`].
    /// Older exports without review counters load with both counters at zero.
    pub fn from_serializable(record: &Value) -> Result<Self, FileError> {
        if let Some(key) = missing_key(record) {
            return Err(FileError::MissingData(format!("missing field `{key}`")));
        }
        let deck = Deck::deserialize(record).map_err(|e| FileError::InvalidData(e.to_string()))?;

        if let Some(card) = deck
            .cards
            .iter()
            .find(|card| card.correct_count > card.review_count)
        {
            return Err(FileError::InvalidCounts {
                front: card.front.clone(),
                correct: card.correct_count,
                reviews: card.review_count,
            });
        }

        Ok(deck)
    }
}

/// First required key absent from a deck record or one of its cards.
fn missing_key(record: &Value) -> Option<&'static str> {
    if record.get("title").is_none() {
        return Some("title");
    }
    let Some(cards) = record.get("cards") else {
        return Some("cards");
    };
    cards
        .as_array()
        .into_iter()
        .flatten()
        .find_map(|card| ["front", "back"].into_iter().find(|key| card.get(key).is_none()))
}

pub(crate) fn rate(correct: u64, reviews: u64) -> f64 {
    if reviews == 0 {
        return 0.0;
    }
    correct as f64 / reviews as f64 * 100.0
}
