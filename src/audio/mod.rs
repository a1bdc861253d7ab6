pub mod file;

pub use file::AudioInfo;
