//! Corpus data directory generation
//!
//! Turns an unordered batch of utterance and segment records into the
//! index files a Kaldi-style recipe reads:
//! - `text`: segment id and transcript
//! - `wav.scp`: utterance id and audio path (optionally templated)
//! - `utt2spk` / `spk2utt`: the speaker to segment relation, both directions
//! - `segments`: time spans, only when at least one record is timed

mod index;
mod manifest;
mod record;
mod writer;

pub use index::CorpusIndex;
pub use manifest::load_records;
pub use record::{Record, Segment, Utterance};
pub use writer::{
    format_seconds, spk2utt_lines, segments_lines, text_lines, utt2spk_lines, wav_scp_lines,
    write_data_set, CorpusWriter, SEGMENTS_FILE, SPK2UTT_FILE, TEXT_FILE, UTT2SPK_FILE,
    WAV_SCP_FILE,
};
