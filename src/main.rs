//! Songkernel - render a procedural three-voice song on the GPU or CPU
//!
//! Every output frame is computed independently from its sample index,
//! then the buffer is read back and written as a 16-bit stereo WAV.

use std::time::Instant;

use clap::Parser;
use log::{info, warn};

use songkernel::backend::{self, Backend};
use songkernel::cli::Args;
use songkernel::wav;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let backend = args.parse_backend();
    let song = args.song_config();
    let output = args.output_config();

    info!(
        "Rendering {} s @ {} Hz ({} frames)",
        song.duration_s,
        song.sample_rate_hz,
        song.total_samples()
    );

    let start = Instant::now();
    let frames = backend::render(backend, &song)?;
    info!(
        "{} render: {:.2}ms",
        backend.name(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if args.compare {
        let other = match backend {
            Backend::Gpu => Backend::Cpu,
            Backend::Cpu => Backend::Gpu,
        };
        let start = Instant::now();
        let reference = backend::render(other, &song)?;
        info!(
            "{} render: {:.2}ms",
            other.name(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        let deviation = backend::compare(&frames, &reference);
        if deviation.differing == 0 {
            info!("Backends match exactly");
        } else {
            warn!(
                "Backends differ in {} frames (max left {}, max right {})",
                deviation.differing, deviation.max_left, deviation.max_right
            );
        }
    }

    wav::write_wav(&output.path, &song, &frames)?;
    info!("Output: {}", output.path);

    Ok(())
}
