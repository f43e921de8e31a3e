//! Command-line argument parsing.

use clap::Parser;
use log::{info, warn};

use crate::backend::Backend;
use crate::params::{OutputConfig, SongConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "songkernel")]
#[command(about = "Render the procedural song kernel to a WAV file", long_about = None)]
pub struct Args {
    /// Backend: gpu (default), cpu
    #[arg(long, value_name = "BACKEND", default_value = "gpu")]
    pub backend: String,

    /// Output WAV file path
    #[arg(long, short, value_name = "PATH", default_value = "song.wav")]
    pub output: String,

    /// Sample rate (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 28160)]
    pub sample_rate: u32,

    /// Clip length (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub duration: u32,

    /// Also render on the other backend and report the deviation
    #[arg(long)]
    pub compare: bool,
}

impl Args {
    /// Parse backend from command-line arguments
    pub fn parse_backend(&self) -> Backend {
        match self.backend.to_lowercase().as_str() {
            "gpu" => {
                info!("Backend: GPU (wgpu compute)");
                Backend::Gpu
            }
            "cpu" => {
                info!("Backend: CPU (rayon)");
                Backend::Cpu
            }
            other => {
                warn!("Unknown backend '{}', using gpu", other);
                Backend::Gpu
            }
        }
    }

    pub fn song_config(&self) -> SongConfig {
        SongConfig::new(self.sample_rate, self.duration)
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.output.clone())
    }
}
