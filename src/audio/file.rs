use crate::error::{Error, Result};
use hound::WavReader;
use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Header-level facts about an audio file. No samples are decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    pub path: String,
    /// Frames per channel
    pub frame_count: u64,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_seconds: f64,
}

impl AudioInfo {
    /// Open `path`, read its frame count and rate, and close it again.
    ///
    /// `.wav` files go through hound; anything else is probed with symphonia.
    pub fn probe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_wav = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

        let (frame_count, sample_rate, channels) = if is_wav {
            probe_wav(path)?
        } else {
            probe_container(path)?
        };

        if sample_rate == 0 {
            return Err(Error::audio(path, "sample rate is zero"));
        }

        let duration_seconds = frame_count as f64 / sample_rate as f64;

        debug!(
            "Probed {}: {:.3}s, {}Hz, {} channels, {} frames",
            path.display(),
            duration_seconds,
            sample_rate,
            channels,
            frame_count
        );

        Ok(Self {
            path: path.display().to_string(),
            frame_count,
            sample_rate,
            channels,
            duration_seconds,
        })
    }

    /// Duration rounded to one decimal place, the end time of a whole-file segment.
    pub fn full_span_seconds(&self) -> f64 {
        round_tenths(self.duration_seconds)
    }
}

/// Round half to even on the exact stored value, so 2.25 gives 2.2 and
/// 0.35 (stored as 0.34999...) gives 0.3.
pub(crate) fn round_tenths(seconds: f64) -> f64 {
    format!("{:.1}", seconds).parse().unwrap_or(seconds)
}

fn probe_wav(path: &Path) -> Result<(u64, u32, u16)> {
    let reader = WavReader::open(path).map_err(|e| Error::audio(path, e))?;
    let spec = reader.spec();
    Ok((u64::from(reader.duration()), spec.sample_rate, spec.channels))
}

fn probe_container(path: &Path) -> Result<(u64, u32, u16)> {
    let file = File::open(path).map_err(|e| Error::audio(path, e))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::audio(path, e))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| Error::audio(path, "no audio track"))?;
    let params = &track.codec_params;

    let frame_count = params
        .n_frames
        .ok_or_else(|| Error::audio(path, "container does not declare a frame count"))?;
    let sample_rate = params
        .sample_rate
        .ok_or_else(|| Error::audio(path, "container does not declare a sample rate"))?;
    let channels = params.channels.map(|c| c.count() as u16).unwrap_or(1);

    Ok((frame_count, sample_rate, channels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(3.0), 3.0);
        assert_eq!(round_tenths(2.96), 3.0);
        assert_eq!(round_tenths(1.234), 1.2);
        assert_eq!(round_tenths(0.0), 0.0);
    }

    #[test]
    fn test_round_tenths_ties_to_even() {
        assert_eq!(round_tenths(0.25), 0.2);
        assert_eq!(round_tenths(2.25), 2.2);
        assert_eq!(round_tenths(0.75), 0.8);
    }

    #[test]
    fn test_round_tenths_uses_stored_value() {
        // 0.35 is stored slightly below, 0.45 slightly above
        assert_eq!(round_tenths(0.35), 0.3);
        assert_eq!(round_tenths(0.45), 0.5);
    }

    #[test]
    fn test_probe_nonexistent_wav() {
        let result = AudioInfo::probe("/nonexistent/path/to/audio.wav");
        assert!(matches!(result, Err(Error::Audio { .. })));
    }

    #[test]
    fn test_probe_nonexistent_flac() {
        let result = AudioInfo::probe("/nonexistent/path/to/audio.flac");
        assert!(matches!(result, Err(Error::Audio { .. })));
    }
}
