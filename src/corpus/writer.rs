use super::index::CorpusIndex;
use super::record::Record;
use crate::config::{PathTemplate, WriterConfig};
use crate::error::Result;
use crate::output::{ensure_dir, write_lines};
use std::path::Path;
use tracing::{info, warn};

pub const TEXT_FILE: &str = "text";
pub const WAV_SCP_FILE: &str = "wav.scp";
pub const UTT2SPK_FILE: &str = "utt2spk";
pub const SPK2UTT_FILE: &str = "spk2utt";
pub const SEGMENTS_FILE: &str = "segments";

/// Writes `text`, `wav.scp`, `utt2spk`, `spk2utt` and (when any record
/// carries timing) `segments` into a data directory.
#[derive(Debug, Clone, Default)]
pub struct CorpusWriter {
    config: WriterConfig,
}

impl CorpusWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write the corpus files for `records` into `dir`, creating it if needed.
    ///
    /// All audio probing and path rendering happens before the first file is written. Existing
    /// files with the same names are overwritten.
    pub fn write(&self, records: &[Record], dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let template = self.config.path_template()?;

        let mut index = CorpusIndex::build(records)?;
        index.complete_segments(|path| self.config.resolve_audio_path(path))?;
        let wav_scp = wav_scp_lines(&index, &template)?;

        ensure_dir(dir)?;
        info!("Writing corpus files to {}", dir.display());

        let encoding = self.config.encoding;
        write_lines(dir, TEXT_FILE, text_lines(&index), encoding)?;
        write_lines(dir, WAV_SCP_FILE, wav_scp, encoding)?;
        write_lines(dir, UTT2SPK_FILE, utt2spk_lines(&index), encoding)?;
        write_lines(dir, SPK2UTT_FILE, spk2utt_lines(&index), encoding)?;

        if index.has_segments() {
            write_lines(dir, SEGMENTS_FILE, segments_lines(&index), encoding)?;
        } else if dir.join(SEGMENTS_FILE).exists() {
            warn!(
                "No record carries timing; leaving existing {} untouched",
                dir.join(SEGMENTS_FILE).display()
            );
        }

        Ok(())
    }
}

/// Write corpus files with the default configuration.
pub fn write_data_set(records: &[Record], dir: impl AsRef<Path>) -> Result<()> {
    CorpusWriter::default().write(records, dir)
}

pub fn text_lines(index: &CorpusIndex) -> impl Iterator<Item = String> + '_ {
    index
        .transcripts()
        .iter()
        .map(|(segment_id, transcript)| format!("{} {}", segment_id, transcript))
}

pub fn wav_scp_lines(index: &CorpusIndex, template: &PathTemplate) -> Result<Vec<String>> {
    index
        .audio_paths()
        .iter()
        .map(|(utterance_id, path)| -> Result<String> {
            Ok(format!("{} {}", utterance_id, template.render(utterance_id, path)?))
        })
        .collect()
}

pub fn utt2spk_lines(index: &CorpusIndex) -> impl Iterator<Item = String> + '_ {
    index
        .speaker_segments()
        .iter()
        .flat_map(|(speaker_id, segment_ids)| {
            segment_ids
                .iter()
                .map(move |segment_id| format!("{} {}", segment_id, speaker_id))
        })
}

pub fn spk2utt_lines(index: &CorpusIndex) -> impl Iterator<Item = String> + '_ {
    index.speaker_segments().iter().map(|(speaker_id, segment_ids)| {
        let ids: Vec<&str> = segment_ids.iter().map(String::as_str).collect();
        format!("{} {}", speaker_id, ids.join(" "))
    })
}

pub fn segments_lines(index: &CorpusIndex) -> impl Iterator<Item = String> + '_ {
    index.segments().iter().map(|segment| {
        format!(
            "{} {} {} {}",
            segment.segment_id,
            segment.utterance_id,
            format_seconds(segment.start_time),
            format_seconds(segment.end_time)
        )
    })
}

/// Shortest decimal that round-trips, always with a fractional part ("3.0", "2.5").
pub fn format_seconds(seconds: f64) -> String {
    format!("{:?}", seconds)
}
