//! WAV export of rendered frames (16-bit stereo PCM).

use crate::params::SongConfig;
use crate::synth::unpack_stereo;

/// WAV format of a rendered song
pub fn song_spec(config: &SongConfig) -> hound::WavSpec {
    hound::WavSpec {
        channels: 2,
        sample_rate: config.sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write packed frames to `path`, left then right per frame
pub fn write_wav(path: &str, config: &SongConfig, frames: &[u32]) -> Result<(), String> {
    let mut writer = hound::WavWriter::create(path, song_spec(config))
        .map_err(|e| format!("Failed to create WAV writer for {}: {}", path, e))?;

    for &frame in frames {
        let (left, right) = unpack_stereo(frame);
        for sample in [left, right] {
            writer
                .write_sample(sample)
                .map_err(|e| format!("Failed to write samples: {}", e))?;
        }
    }

    writer
        .finalize()
        .map_err(|e| format!("Failed to finalize WAV: {}", e))
}
