//! Host-side renderer: one rayon task per output frame.

use rayon::prelude::*;

use crate::params::SongConfig;
use crate::synth::render_frame;

/// Render every frame of the song into a freshly sized buffer
pub fn render(config: &SongConfig) -> Result<Vec<u32>, String> {
    config
        .validate()
        .map_err(|e| format!("Invalid song config: {}", e))?;

    let mut frames = vec![0u32; config.total_samples()];
    render_into(config, &mut frames);
    Ok(frames)
}

/// Fill `frames` in place; slot `i` receives the frame for dispatch index `i`
pub fn render_into(config: &SongConfig, frames: &mut [u32]) {
    frames
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, frame)| *frame = render_frame(index, config));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sized_to_song() {
        let config = SongConfig::new(1000, 3);
        let frames = render(&config).unwrap();
        assert_eq!(frames.len(), 3000);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SongConfig::new(2000, 4);
        let frames = render(&config).unwrap();
        for (index, frame) in frames.iter().enumerate().step_by(13) {
            assert_eq!(*frame, render_frame(index, &config));
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(render(&SongConfig::new(0, 1)).is_err());
    }
}
