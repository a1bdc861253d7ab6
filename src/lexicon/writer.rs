use super::entry::{LexiconEntry, Pronunciation};
use crate::config::WriterConfig;
use crate::error::{Error, Result};
use crate::output::{ensure_dir, write_lines};
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub const LEXICON_FILE: &str = "lexicon.txt";

/// A flat list of (word, pronunciation) entries, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn from_pairs<I, W, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: Into<String>,
        P: Into<String>,
    {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(word, pronunciation)| LexiconEntry::new(word, pronunciation))
                .collect(),
        )
    }

    /// Expand a word -> pronunciation(s) mapping into one entry per variant.
    pub fn from_map<I, W, P>(map: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: Into<String>,
        P: Into<Pronunciation>,
    {
        let mut entries = Vec::new();
        for (word, pronunciation) in map {
            let word = word.into();
            let pronunciation = pronunciation.into();
            entries.extend(
                pronunciation
                    .iter()
                    .map(|variant| LexiconEntry::new(word.clone(), variant)),
            );
        }
        Self::from_entries(entries)
    }

    /// Build from a JSON object whose values are strings or arrays of strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::shape(
                "lexicon",
                format!("expected an object of word -> pronunciation, got {}", value),
            )
        })?;

        let mut map = Vec::with_capacity(object.len());
        for (word, pronunciation) in object {
            map.push((word.as_str(), Pronunciation::from_value(word, pronunciation)?));
        }
        Ok(Self::from_map(map))
    }

    pub fn from_entries(mut entries: Vec<LexiconEntry>) -> Self {
        entries.sort();
        Self { entries }
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(LexiconEntry::to_line)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LexiconWriter {
    config: WriterConfig,
}

impl LexiconWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write `lexicon.txt` into `dir`, creating the directory if needed.
    pub fn write(&self, lexicon: &Lexicon, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        ensure_dir(dir)?;

        let count = write_lines(dir, LEXICON_FILE, lexicon.lines(), self.config.encoding)?;
        info!("Wrote {} lexicon entries to {}", count, dir.display());
        Ok(())
    }
}

/// Write `lexicon.txt` from (word, pronunciation) pairs with the default configuration.
pub fn write_lexicon<I, W, P>(pairs: I, dir: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = (W, P)>,
    W: Into<String>,
    P: Into<String>,
{
    LexiconWriter::default().write(&Lexicon::from_pairs(pairs), dir)
}
