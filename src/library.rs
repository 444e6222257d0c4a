//! The collection of decks the application works on.

use serde_json::Value;

use crate::error::{check_index, DeckError, FileError};
use crate::models::{rate, Deck};

/// Ordered decks, in creation/import order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    decks: Vec<Deck>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_decks(decks: Vec<Deck>) -> Self {
        Self { decks }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn deck(&self, index: usize) -> Result<&Deck, DeckError> {
        check_index(index, self.decks.len())?;
        Ok(&self.decks[index])
    }

    pub fn deck_mut(&mut self, index: usize) -> Result<&mut Deck, DeckError> {
        check_index(index, self.decks.len())?;
        Ok(&mut self.decks[index])
    }

    /// Append an empty deck and return its position.
    pub fn add_deck(&mut self, title: impl Into<String>) -> usize {
        self.decks.push(Deck::new(title));
        self.decks.len() - 1
    }

    pub fn remove_deck(&mut self, index: usize) -> Result<Deck, DeckError> {
        check_index(index, self.decks.len())?;
        Ok(self.decks.remove(index))
    }

    pub fn rename_deck(&mut self, index: usize, title: impl Into<String>) -> Result<(), DeckError> {
        self.deck_mut(index)?.rename(title);
        Ok(())
    }

    pub fn extend(&mut self, decks: impl IntoIterator<Item = Deck>) {
        self.decks.extend(decks);
    }

    pub fn total_cards(&self) -> usize {
        self.decks.iter().map(Deck::len).sum()
    }

    pub fn total_score(&self) -> u64 {
        self.decks.iter().map(Deck::total_score).sum()
    }

    pub fn total_reviews(&self) -> u64 {
        self.decks.iter().map(Deck::total_reviews).sum()
    }

    /// Success rate over every card of every deck.
    pub fn success_rate(&self) -> f64 {
        rate(self.total_score(), self.total_reviews())
    }

    pub fn to_serializable(&self) -> Value {
        decks_to_serializable(&self.decks)
    }

    pub fn from_serializable(value: &Value) -> Result<Self, FileError> {
        decks_from_serializable(value).map(Self::from_decks)
    }
}

pub fn decks_to_serializable(decks: &[Deck]) -> Value {
    Value::Array(decks.iter().map(Deck::to_serializable).collect())
}

/// Convert a JSON array of deck records. One bad record fails the whole
/// conversion.
pub fn decks_from_serializable(value: &Value) -> Result<Vec<Deck>, FileError> {
    let records = value
        .as_array()
        .ok_or_else(|| FileError::InvalidData("expected a list of decks".to_string()))?;

    records.iter().map(Deck::from_serializable).collect()
}
