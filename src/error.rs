use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the corpus and lexicon writers.
///
/// Nothing is retried. A failure part way through a write call can leave
/// some output files written and others missing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read audio duration from {}: {reason}", path.display())]
    Audio { path: PathBuf, reason: String },

    #[error("malformed entry {entry}: {message}")]
    Shape { entry: String, message: String },

    #[error("pronunciation for word {word:?} must be a string or an array of strings, got {type_name}: {value}")]
    Pronunciation {
        word: String,
        value: String,
        type_name: &'static str,
    },

    #[error("character {character:?} in {file} cannot be encoded as {encoding}")]
    Encoding {
        file: String,
        character: char,
        encoding: &'static str,
    },

    #[error("wav.scp path template {template:?} has no {{}} placeholder")]
    Template { template: String },

    #[error("failed to load writer configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn shape(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Shape {
            entry: entry.into(),
            message: message.into(),
        }
    }

    pub(crate) fn audio(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Error::Audio {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
