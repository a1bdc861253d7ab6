use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Options shared by every write call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Character encoding of every output file
    pub encoding: TextEncoding,

    /// Format applied to each audio path in `wav.scp`; `{}` is replaced by the path.
    /// Default: "{}" (path written as-is)
    pub wav_format: String,

    /// Directory that relative audio paths are resolved against when probing
    /// durations. `wav.scp` still receives the path as given.
    pub audio_root: Option<PathBuf>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            wav_format: "{}".to_string(),
            audio_root: None,
        }
    }
}

impl WriterConfig {
    /// Load from a TOML, YAML or JSON file. Missing keys keep their defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_wav_format(mut self, wav_format: impl Into<String>) -> Self {
        self.wav_format = wav_format.into();
        self
    }

    pub fn with_audio_root(mut self, audio_root: impl Into<PathBuf>) -> Self {
        self.audio_root = Some(audio_root.into());
        self
    }

    /// Where to look for `audio_path` on disk.
    pub fn resolve_audio_path(&self, audio_path: &Path) -> PathBuf {
        match &self.audio_root {
            Some(root) if audio_path.is_relative() => root.join(audio_path),
            _ => audio_path.to_path_buf(),
        }
    }

    pub fn path_template(&self) -> Result<PathTemplate> {
        PathTemplate::new(&self.wav_format)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// ISO-8859-1. Only code points up to U+00FF are representable.
    #[serde(alias = "iso-8859-1", alias = "latin-1")]
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Encode one line. `file` only labels the error.
    pub fn encode(self, line: &str, file: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(line.as_bytes().to_vec()),
            TextEncoding::Latin1 => line
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| Error::Encoding {
                        file: file.to_string(),
                        character: c,
                        encoding: self.name(),
                    })
                })
                .collect(),
        }
    }
}

/// Validated `wav.scp` path format.
///
/// Every `{}` in the format is replaced by the audio path, which allows
/// absolute-path prefixes or command pipelines such as
/// `"sox {} -t wav -r 16000 - |"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    format: String,
}

impl PathTemplate {
    pub const PLACEHOLDER: &'static str = "{}";

    pub fn new(format: &str) -> Result<Self> {
        if !format.contains(Self::PLACEHOLDER) {
            return Err(Error::Template {
                template: format.to_string(),
            });
        }
        Ok(Self {
            format: format.to_string(),
        })
    }

    pub fn identity() -> Self {
        Self {
            format: Self::PLACEHOLDER.to_string(),
        }
    }

    /// Fill the template with `path`. Paths that aren't valid UTF-8 fail
    /// with a shape error naming `utterance_id`.
    pub fn render(&self, utterance_id: &str, path: &Path) -> Result<String> {
        let path = path.to_str().ok_or_else(|| {
            Error::shape(
                format!("{:?}", utterance_id),
                format!("audio path {} is not valid UTF-8", path.display()),
            )
        })?;
        Ok(self.format.replace(Self::PLACEHOLDER, path))
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::identity()
    }
}
