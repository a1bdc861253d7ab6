//! Kaldi-style data directory preparation.
//!
//! [`CorpusWriter`] turns utterance and segment records into `text`,
//! `wav.scp`, `utt2spk`, `spk2utt` and `segments`; [`LexiconWriter`]
//! writes `lexicon.txt`. Every file is sorted, so output doesn't depend
//! on input order.

pub mod audio;
pub mod config;
pub mod corpus;
pub mod error;
pub mod lexicon;
mod output;

pub use audio::AudioInfo;
pub use config::{PathTemplate, TextEncoding, WriterConfig};
pub use corpus::{load_records, write_data_set, CorpusIndex, CorpusWriter, Record, Segment, Utterance};
pub use error::{Error, Result};
pub use lexicon::{write_lexicon, Lexicon, LexiconEntry, LexiconWriter, Pronunciation};
