//! 16-bit stereo PCM packing into 32-bit storage words.
//!
//! Layout: left channel in the high 16 bits, right channel in the low 16.

use glam::Vec2;

/// Full-scale value of a signed 16-bit sample
pub const PCM_SCALE: f32 = 32767.0;

/// Convert one channel from [-1, 1] to signed 16-bit (truncates toward zero)
pub fn to_pcm16(sample: f32) -> i16 {
    (PCM_SCALE * sample.clamp(-1.0, 1.0)) as i16
}

/// Pack a stereo pair into one frame word
pub fn pack_stereo(stereo: Vec2) -> u32 {
    let l = to_pcm16(stereo.x) as u16 as u32;
    let r = to_pcm16(stereo.y) as u16 as u32;
    (l << 16) | r
}

/// Split a frame word back into (left, right)
pub fn unpack_stereo(frame: u32) -> (i16, i16) {
    ((frame >> 16) as u16 as i16, frame as u16 as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_layout() {
        assert_eq!(pack_stereo(Vec2::new(1.0, 0.0)), 0x7fff_0000);
        assert_eq!(pack_stereo(Vec2::new(0.0, 1.0)), 0x0000_7fff);
        assert_eq!(pack_stereo(Vec2::new(-1.0, -1.0)), 0x8001_8001);
    }

    #[test]
    fn test_unpack_recovers_channels() {
        let cases = [(0.25, -0.75), (-0.5, 0.5), (0.999, -0.001), (0.0, 0.0)];
        for (l, r) in cases {
            let (ul, ur) = unpack_stereo(pack_stereo(Vec2::new(l, r)));
            // Truncation is at most one step from rounding
            assert!((ul as f32 - (PCM_SCALE * l).round()).abs() <= 1.0);
            assert!((ur as f32 - (PCM_SCALE * r).round()).abs() <= 1.0);
        }
    }

    #[test]
    fn test_negative_right_does_not_bleed_into_left() {
        let (l, r) = unpack_stereo(pack_stereo(Vec2::new(0.0, -0.5)));
        assert_eq!(l, 0);
        assert_eq!(r, -16383);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(to_pcm16(3.0), 32767);
        assert_eq!(to_pcm16(-3.0), -32767);
        assert_eq!(to_pcm16(f32::NAN), 0);
    }
}
