//! Output file configuration.

/// Where the rendered clip is written
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// WAV file path
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "song.wav".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
