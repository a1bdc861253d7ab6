use super::record::Record;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Read records from a JSON Lines manifest, one tagged record per line.
///
/// ```text
/// {"kind":"utterance","utterance_id":"u1","speaker_id":"spkA","transcript":"hello","audio_path":"a.wav"}
/// {"kind":"segment","segment_id":"s1","utterance_id":"u2","speaker_id":"spkA","transcript":"hi","audio_path":"b.wav","start_time":1.0,"end_time":2.5}
/// ```
///
/// Blank lines are skipped. A line that doesn't describe a record fails
/// with a shape error naming the line.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;

    let mut records = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: Record = serde_json::from_str(&line).map_err(|e| {
            Error::shape(format!("{}:{}", path.display(), number + 1), e.to_string())
        })?;
        records.push(record);
    }

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
