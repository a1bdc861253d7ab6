use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One recording with no internal time segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub utterance_id: String,
    pub speaker_id: String,
    pub transcript: String,
    #[serde(alias = "filename")]
    pub audio_path: PathBuf,
}

impl Utterance {
    pub fn new(
        utterance_id: impl Into<String>,
        speaker_id: impl Into<String>,
        transcript: impl Into<String>,
        audio_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            utterance_id: utterance_id.into(),
            speaker_id: speaker_id.into(),
            transcript: transcript.into(),
            audio_path: audio_path.into(),
        }
    }
}

/// A labeled time span inside an utterance's audio file.
///
/// Segments order by their fields in declaration order, which is the
/// order of the `segments` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub segment_id: String,
    pub utterance_id: String,
    pub speaker_id: String,
    pub transcript: String,
    #[serde(alias = "filename")]
    pub audio_path: PathBuf,
    /// Seconds from the start of the audio file
    pub start_time: f64,
    /// Seconds from the start of the audio file
    pub end_time: f64,
}

impl Segment {
    pub fn new(
        segment_id: impl Into<String>,
        utterance: &Utterance,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            segment_id: segment_id.into(),
            utterance_id: utterance.utterance_id.clone(),
            speaker_id: utterance.speaker_id.clone(),
            transcript: utterance.transcript.clone(),
            audio_path: utterance.audio_path.clone(),
            start_time,
            end_time,
        }
    }

    /// A segment covering the whole of `utterance`, reusing the utterance id as segment id.
    pub fn full_span(utterance: &Utterance, duration_seconds: f64) -> Self {
        Self::new(utterance.utterance_id.clone(), utterance, 0.0, duration_seconds)
    }

    fn cmp_fields(&self, other: &Self) -> Ordering {
        self.segment_id
            .cmp(&other.segment_id)
            .then_with(|| self.utterance_id.cmp(&other.utterance_id))
            .then_with(|| self.speaker_id.cmp(&other.speaker_id))
            .then_with(|| self.transcript.cmp(&other.transcript))
            .then_with(|| self.audio_path.cmp(&other.audio_path))
            .then_with(|| self.start_time.total_cmp(&other.start_time))
            .then_with(|| self.end_time.total_cmp(&other.end_time))
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_fields(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_fields(other)
    }
}

/// An input item for the corpus writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Utterance(Utterance),
    Segment(Segment),
}

impl Record {
    pub fn utterance_id(&self) -> &str {
        match self {
            Record::Utterance(u) => &u.utterance_id,
            Record::Segment(s) => &s.utterance_id,
        }
    }

    pub fn speaker_id(&self) -> &str {
        match self {
            Record::Utterance(u) => &u.speaker_id,
            Record::Segment(s) => &s.speaker_id,
        }
    }

    pub fn transcript(&self) -> &str {
        match self {
            Record::Utterance(u) => &u.transcript,
            Record::Segment(s) => &s.transcript,
        }
    }

    pub fn audio_path(&self) -> &Path {
        match self {
            Record::Utterance(u) => &u.audio_path,
            Record::Segment(s) => &s.audio_path,
        }
    }

    /// The id used in `text`, `utt2spk` and `spk2utt`: the segment id for
    /// segments, the utterance id otherwise.
    pub fn segment_id(&self) -> &str {
        match self {
            Record::Utterance(u) => &u.utterance_id,
            Record::Segment(s) => &s.segment_id,
        }
    }

    pub fn is_segment(&self) -> bool {
        matches!(self, Record::Segment(_))
    }

    /// Reject records whose identifiers are empty; they cannot be grouped.
    pub fn validate(&self) -> Result<()> {
        let label = match self.segment_id() {
            "" => self.utterance_id(),
            id => id,
        };
        let mut required = vec![
            ("utterance_id", self.utterance_id()),
            ("speaker_id", self.speaker_id()),
        ];
        if let Record::Segment(s) = self {
            required.push(("segment_id", &s.segment_id));
        }

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::shape(
                    format!("{:?}", label),
                    format!("missing required field `{}`", field),
                ));
            }
        }
        Ok(())
    }
}

impl From<Utterance> for Record {
    fn from(utterance: Utterance) -> Self {
        Record::Utterance(utterance)
    }
}

impl From<Segment> for Record {
    fn from(segment: Segment) -> Self {
        Record::Segment(segment)
    }
}
