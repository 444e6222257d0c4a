//! Error types shared by the deck model and the file layer.

use std::path::PathBuf;

use thiserror::Error;

/// A position that does not address an existing card or deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("index {index} is out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures while exporting or importing a deck collection.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The selected file is not a valid JSON file.")]
    InvalidJson(#[from] serde_json::Error),

    #[error("The JSON file is missing required data: {0}")]
    MissingData(String),

    #[error("The JSON file contains invalid data: {0}")]
    InvalidData(String),

    #[error("card \"{front}\" has {correct} correct answers but only {reviews} reviews")]
    InvalidCounts {
        front: String,
        correct: u32,
        reviews: u32,
    },
}

impl FileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Dialog title used when the error reaches the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Io { .. } => "File Error",
            _ => "Import Error",
        }
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), DeckError> {
    if index < len {
        Ok(())
    } else {
        Err(DeckError::IndexOutOfRange { index, len })
    }
}
