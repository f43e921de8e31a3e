//! Voice staggering, stereo placement and the per-sample kernel body.

use glam::Vec2;

use super::instrument::{note_frequency, tone};
use super::melody::lookup;
use super::pcm::pack_stereo;
use crate::params::song_constants::{UNIT_S, VOICE_COUNT, VOICE_STAGGER_S};
use crate::params::SongConfig;

/// Position of a voice across the chord, 0.0 (first) to 1.0 (last)
pub fn voice_position(voice: usize) -> f32 {
    voice as f32 / (VOICE_COUNT as f32 - 1.0)
}

/// Left/right weights of a voice
pub fn voice_pan(h: f32) -> Vec2 {
    Vec2::new(0.5 + 0.2 * h, 0.5 - 0.2 * h)
}

/// Level of a voice; later voices are quieter
pub fn voice_taper(h: f32) -> f32 {
    1.0 - h.sqrt() * 0.85
}

/// Mono instrument signal of one voice at `time` seconds (before pan and taper)
pub fn voice_signal(voice: usize, time: f32) -> f32 {
    let h = voice_position(voice);
    let t = (time - VOICE_STAGGER_S * h) / UNIT_S;

    match lookup(t) {
        Some(note) => {
            let note_time = UNIT_S * (t - note.onset_units);
            tone(note_frequency(note.pitch), note_time)
        }
        None => 0.0,
    }
}

/// Stereo contribution of one voice at `time` seconds
pub fn voice_output(voice: usize, time: f32) -> Vec2 {
    let h = voice_position(voice);
    voice_signal(voice, time) * voice_pan(h) * voice_taper(h)
}

/// All voices summed at `time` seconds
pub fn mix_at(time: f32) -> Vec2 {
    (0..VOICE_COUNT).map(|v| voice_output(v, time)).sum()
}

/// Packed stereo frame for one dispatch index
pub fn render_frame(index: usize, config: &SongConfig) -> u32 {
    pack_stereo(mix_at(config.time_at(index)))
}
