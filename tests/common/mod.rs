// Shared helpers for integration tests

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Write a silent 16-bit WAV file of `seconds` length.
pub fn write_silent_wav(path: &Path, seconds: f64, sample_rate: u32, channels: u16) -> Result<PathBuf> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let frames = (seconds * sample_rate as f64).round() as usize;
    for _ in 0..frames * channels as usize {
        writer.write_sample(0i16)?;
    }
    writer.finalize()?;

    Ok(path.to_path_buf())
}

pub fn read_lines(dir: &Path, file_name: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(dir.join(file_name))?;
    Ok(content.lines().map(str::to_string).collect())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
