use super::record::{Record, Segment, Utterance};
use crate::audio::AudioInfo;
use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sorted lookup tables derived from one batch of records.
///
/// All maps are keyed and iterated in lexicographic order, so the files
/// rendered from them don't depend on input order.
#[derive(Debug, Default)]
pub struct CorpusIndex {
    /// segment id -> transcript
    transcripts: BTreeMap<String, String>,
    /// segment id -> speaker id
    segment_speakers: BTreeMap<String, String>,
    /// speaker id -> segment ids
    speaker_segments: BTreeMap<String, BTreeSet<String>>,
    /// segment id -> utterance id
    segment_utterances: BTreeMap<String, String>,
    /// utterance id -> audio path (several segments can share one file)
    audio_paths: BTreeMap<String, PathBuf>,
    /// records carrying explicit timing
    timed: BTreeSet<Segment>,
    /// utterance id -> records without timing
    untimed: BTreeMap<String, Utterance>,
}

impl CorpusIndex {
    /// Group `records` by speaker and fill every table in one pass.
    pub fn build(records: &[Record]) -> Result<Self> {
        for record in records {
            record.validate()?;
        }

        let mut sorted: Vec<&Record> = records.iter().collect();
        sorted.sort_by(|a, b| a.speaker_id().cmp(b.speaker_id()));

        let mut index = Self::default();

        for group in sorted.chunk_by(|a, b| a.speaker_id() == b.speaker_id()) {
            let speaker_id = group[0].speaker_id();
            let mut speaker_segments = BTreeSet::new();

            for record in group {
                let segment_id = record.segment_id();
                let utterance_id = record.utterance_id();

                if let Some(previous) = index
                    .segment_speakers
                    .insert(segment_id.to_string(), speaker_id.to_string())
                {
                    warn!("Duplicate segment id {}, keeping the later record", segment_id);
                    index.timed.retain(|s| s.segment_id != segment_id);
                    index.untimed.remove(segment_id);
                    if previous != speaker_id {
                        if let Some(ids) = index.speaker_segments.get_mut(&previous) {
                            ids.remove(segment_id);
                        }
                    }
                }
                if let Some(previous) = index
                    .segment_utterances
                    .insert(segment_id.to_string(), utterance_id.to_string())
                {
                    // drop the replaced record's audio unless another segment still uses it
                    if previous != utterance_id
                        && !index.segment_utterances.values().any(|u| *u == previous)
                    {
                        index.audio_paths.remove(&previous);
                    }
                }
                index
                    .transcripts
                    .insert(segment_id.to_string(), record.transcript().to_string());
                index
                    .audio_paths
                    .insert(utterance_id.to_string(), record.audio_path().to_path_buf());
                speaker_segments.insert(segment_id.to_string());

                match record {
                    Record::Segment(segment) => {
                        index.timed.insert(segment.clone());
                    }
                    Record::Utterance(utterance) => {
                        index
                            .untimed
                            .insert(utterance.utterance_id.clone(), utterance.clone());
                    }
                }
            }

            index
                .speaker_segments
                .insert(speaker_id.to_string(), speaker_segments);
        }

        index.speaker_segments.retain(|_, ids| !ids.is_empty());

        info!(
            "Indexed {} records: {} speakers, {} timed, {} untimed",
            records.len(),
            index.speaker_segments.len(),
            index.timed.len(),
            index.untimed.len()
        );

        Ok(index)
    }

    /// When timed and untimed records are mixed, give every untimed record
    /// a whole-file segment so the `segments` file covers every id.
    ///
    /// `resolve` maps an audio path to the location to probe on disk.
    /// Returns the number of segments synthesized.
    pub fn complete_segments<F>(&mut self, resolve: F) -> Result<usize>
    where
        F: Fn(&Path) -> PathBuf,
    {
        if self.timed.is_empty() || self.untimed.is_empty() {
            return Ok(0);
        }

        let untimed = std::mem::take(&mut self.untimed);
        let count = untimed.len();

        for utterance in untimed.values() {
            let info = AudioInfo::probe(resolve(&utterance.audio_path))?;
            self.timed
                .insert(Segment::full_span(utterance, info.full_span_seconds()));
        }

        info!(
            "Mixed timed and untimed records: synthesized {} whole-file segments",
            count
        );
        Ok(count)
    }

    pub fn transcripts(&self) -> &BTreeMap<String, String> {
        &self.transcripts
    }

    pub fn speaker_of(&self, segment_id: &str) -> Option<&str> {
        self.segment_speakers.get(segment_id).map(String::as_str)
    }

    pub fn speaker_segments(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.speaker_segments
    }

    pub fn audio_paths(&self) -> &BTreeMap<String, PathBuf> {
        &self.audio_paths
    }

    pub fn segments(&self) -> &BTreeSet<Segment> {
        &self.timed
    }

    pub fn has_segments(&self) -> bool {
        !self.timed.is_empty()
    }

    #[cfg(test)]
    fn untimed(&self) -> impl Iterator<Item = &Utterance> {
        self.untimed.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(id: &str, speaker: &str) -> Record {
        Record::from(Utterance::new(id, speaker, format!("say {}", id), format!("{}.wav", id)))
    }

    #[test]
    fn test_groups_by_speaker() {
        let records = vec![
            utterance("u3", "spkB"),
            utterance("u2", "spkA"),
            utterance("u1", "spkA"),
        ];
        let index = CorpusIndex::build(&records).unwrap();

        let speakers: Vec<_> = index.speaker_segments().keys().cloned().collect();
        assert_eq!(speakers, vec!["spkA", "spkB"]);

        let spk_a: Vec<_> = index.speaker_segments()["spkA"].iter().cloned().collect();
        assert_eq!(spk_a, vec!["u1", "u2"]);
        assert_eq!(index.speaker_of("u3"), Some("spkB"));
    }

    #[test]
    fn test_audio_paths_keyed_by_utterance() {
        let base = Utterance::new("u1", "spkA", "", "long.wav");
        let records = vec![
            Record::from(Segment::new("u1-a", &base, 0.0, 1.0)),
            Record::from(Segment::new("u1-b", &base, 1.0, 2.0)),
        ];
        let index = CorpusIndex::build(&records).unwrap();

        assert_eq!(index.audio_paths().len(), 1);
        assert_eq!(index.audio_paths()["u1"], PathBuf::from("long.wav"));
        assert_eq!(index.transcripts().len(), 2);
        assert_eq!(index.segments().len(), 2);
    }

    #[test]
    fn test_untimed_only_has_no_segments() {
        let records = vec![utterance("u1", "spkA"), utterance("u2", "spkA")];
        let mut index = CorpusIndex::build(&records).unwrap();

        let synthesized = index
            .complete_segments(|_| panic!("audio should not be probed"))
            .unwrap();

        assert_eq!(synthesized, 0);
        assert!(!index.has_segments());
        assert_eq!(index.untimed().count(), 2);
    }

    #[test]
    fn test_duplicate_segment_id_later_wins() {
        let first = Record::from(Utterance::new("u1", "spkA", "first", "a.wav"));
        let second = Record::from(Utterance::new("u1", "spkA", "second", "b.wav"));
        let index = CorpusIndex::build(&[first, second]).unwrap();

        assert_eq!(index.transcripts()["u1"], "second");
        assert_eq!(index.audio_paths()["u1"], PathBuf::from("b.wav"));
    }

    #[test]
    fn test_duplicate_timed_segment_keeps_one_entry() {
        let base = Utterance::new("u1", "spkA", "", "a.wav");
        let records = vec![
            Record::from(Segment::new("s1", &base, 0.0, 1.0)),
            Record::from(Segment::new("s1", &base, 2.0, 3.0)),
        ];
        let index = CorpusIndex::build(&records).unwrap();

        assert_eq!(index.segments().len(), 1);
        assert_eq!(index.segments().iter().next().unwrap().start_time, 2.0);
    }

    #[test]
    fn test_replaced_record_releases_its_audio_path() {
        let other = Utterance::new("u9", "spkA", "", "z.wav");
        let records = vec![
            Record::from(Utterance::new("u1", "spkA", "", "a.wav")),
            Record::from(Segment::new("u1", &other, 0.0, 1.0)),
        ];
        let index = CorpusIndex::build(&records).unwrap();

        let utterances: Vec<_> = index.audio_paths().keys().cloned().collect();
        assert_eq!(utterances, vec!["u9"]);
        assert_eq!(index.untimed().count(), 0);
    }

    #[test]
    fn test_replaced_record_keeps_shared_audio_path() {
        let long = Utterance::new("u1", "spkA", "", "long.wav");
        let other = Utterance::new("u9", "spkA", "", "z.wav");
        let records = vec![
            Record::from(Segment::new("s1", &long, 0.0, 1.0)),
            Record::from(Segment::new("s2", &long, 1.0, 2.0)),
            Record::from(Segment::new("s1", &other, 0.0, 1.0)),
        ];
        let index = CorpusIndex::build(&records).unwrap();

        let utterances: Vec<_> = index.audio_paths().keys().cloned().collect();
        assert_eq!(utterances, vec!["u1", "u9"]);
    }

    #[test]
    fn test_duplicate_segment_id_across_speakers() {
        let first = Record::from(Utterance::new("u1", "spkA", "first", "a.wav"));
        let second = Record::from(Utterance::new("u1", "spkB", "second", "a.wav"));
        let index = CorpusIndex::build(&[first, second]).unwrap();

        assert_eq!(index.speaker_of("u1"), Some("spkB"));
        assert!(!index.speaker_segments().contains_key("spkA"));
        assert!(index.speaker_segments()["spkB"].contains("u1"));
    }

    #[test]
    fn test_rejects_malformed_record() {
        let records = vec![utterance("u1", "spkA"), utterance("", "spkA")];
        assert!(CorpusIndex::build(&records).is_err());
    }
}
