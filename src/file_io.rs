use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::FileError;
use crate::library::{decks_from_serializable, decks_to_serializable, Library};
use crate::models::Deck;

/// Write `decks` as a pretty-printed JSON array. The document goes to a
/// sibling temp file first and is renamed over `path`, so a failed export
/// never leaves a truncated file behind.
pub fn export_decks(path: &Path, decks: &[Deck]) -> Result<(), FileError> {
    let document = serde_json::to_string_pretty(&decks_to_serializable(decks))?;
    let tmp = temp_path(path);

    fs::write(&tmp, document).map_err(|e| FileError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(FileError::io(path, e));
    }

    info!(path = %path.display(), decks = decks.len(), "exported decks");
    Ok(())
}

/// Read and fully parse a deck file. Nothing is returned unless every deck
/// record in it is valid.
pub fn import_decks(path: &Path) -> Result<Vec<Deck>, FileError> {
    let content = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    let decks = parse_decks(&content).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "rejected deck file");
    })?;

    info!(path = %path.display(), decks = decks.len(), "imported decks");
    Ok(decks)
}

pub fn parse_decks(content: &str) -> Result<Vec<Deck>, FileError> {
    let value: Value = serde_json::from_str(content)?;
    decks_from_serializable(&value)
}

/// Load the saved library. A file that does not exist yet is an empty
/// library, not an error.
pub fn load_library(path: &Path) -> Result<Library, FileError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let decks = parse_decks(&content)?;
            info!(path = %path.display(), decks = decks.len(), "loaded library");
            Ok(Library::from_decks(decks))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no saved library, starting empty");
            Ok(Library::new())
        }
        Err(e) => Err(FileError::io(path, e)),
    }
}

pub fn save_library(path: &Path, library: &Library) -> Result<(), FileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }
    export_decks(path, library.decks())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
