//! Additive bell-like instrument: three decaying partials, saturation,
//! tremolo and a short attack gate.

use std::f32::consts::TAU;

use crate::params::song_constants::{REFERENCE_HZ, REFERENCE_PITCH};

/// One sine partial of the instrument
#[derive(Clone, Copy, Debug)]
pub struct Partial {
    pub amplitude: f32,
    /// Frequency multiple of the fundamental
    pub ratio: f32,
    /// Decay rate multiple (higher partials fade faster)
    pub decay: f32,
}

/// Fundamental, slightly sharp octave, slightly sharp double octave
#[rustfmt::skip]
pub const PARTIALS: [Partial; 3] = [
    Partial { amplitude: 0.5, ratio: 1.00, decay: 1.0 },
    Partial { amplitude: 0.3, ratio: 2.01, decay: 2.0 },
    Partial { amplitude: 0.2, ratio: 4.01, decay: 4.0 },
];

/// Decay per unit of phase (cycles); partial envelopes are `exp(-k * decay * f * t)`
pub const DECAY_PER_CYCLE: f32 = 0.0015;

/// Cubic saturation amount
pub const SATURATION: f32 = 0.1;

/// Tremolo angular rate (rad/s) and depth
pub const TREMOLO_RATE: f32 = 40.0;
pub const TREMOLO_DEPTH: f32 = 0.1;

/// Attack ramp length (seconds)
pub const ATTACK_S: f32 = 0.01;

/// 12-TET frequency of a MIDI pitch (A4 = 440 Hz)
pub fn note_frequency(pitch: f32) -> f32 {
    REFERENCE_HZ * 2.0f32.powf((pitch - REFERENCE_PITCH) / 12.0)
}

/// Hermite step between `edge0` and `edge1`, clamped to [0, 1]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Instrument output for a note of `freq` Hz, `note_time` seconds after onset
pub fn tone(freq: f32, note_time: f32) -> f32 {
    let mut y: f32 = PARTIALS
        .iter()
        .map(|p| {
            p.amplitude
                * (TAU * p.ratio * freq * note_time).sin()
                * (-DECAY_PER_CYCLE * p.decay * freq * note_time).exp()
        })
        .sum();

    y += SATURATION * y * y * y;
    y *= (1.0 - TREMOLO_DEPTH) + TREMOLO_DEPTH * (TREMOLO_RATE * note_time).cos();
    y * smoothstep(0.0, ATTACK_S, note_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitch() {
        assert!((note_frequency(69.0) - 440.0).abs() < 1e-3);
        assert!((note_frequency(71.0) - 493.883).abs() < 1e-2);
    }

    #[test]
    fn test_octave_doubles() {
        for p in 40..100 {
            let p = p as f32;
            let ratio = note_frequency(p + 12.0) / note_frequency(p);
            assert!((ratio - 2.0).abs() < 1e-5, "pitch {}: ratio {}", p, ratio);
        }
    }

    #[test]
    fn test_frequency_monotonic() {
        let mut last = 0.0;
        for p in 0..128 {
            let f = note_frequency(p as f32);
            assert!(f > last);
            last = f;
        }
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 0.01, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 0.01, 0.0), 0.0);
        assert!((smoothstep(0.0, 0.01, 0.005) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(0.0, 0.01, 0.01), 1.0);
        assert_eq!(smoothstep(0.0, 0.01, 3.0), 1.0);
    }

    #[test]
    fn test_attack_gate_silences_onset() {
        let f = note_frequency(71.0);
        assert_eq!(tone(f, 0.0), 0.0);
        assert_eq!(tone(f, -0.5), 0.0);
        // Ramp is partially open inside the attack window
        let early = tone(f, 0.0002).abs();
        let open = (1..50)
            .map(|i| tone(f, 0.01 + i as f32 * 1e-4).abs())
            .fold(0.0f32, f32::max);
        assert!(early < open);
    }

    #[test]
    fn test_tone_decays() {
        let f = note_frequency(76.0);
        let peak = |start: f32| {
            (0..200)
                .map(|i| tone(f, start + i as f32 / 44100.0).abs())
                .fold(0.0f32, f32::max)
        };
        assert!(peak(0.02) > peak(1.0));
        assert!(peak(1.0) > peak(4.0));
    }

    #[test]
    fn test_tone_bounded() {
        let f = note_frequency(86.0);
        for i in 0..20000 {
            assert!(tone(f, i as f32 / 28160.0).abs() <= 1.2);
        }
    }
}
