//! Pronunciation lexicon output (`lexicon.txt`)

mod entry;
mod writer;

pub use entry::{LexiconEntry, Pronunciation};
pub use writer::{write_lexicon, Lexicon, LexiconWriter, LEXICON_FILE};
