//! Song rendering configuration and kernel constants.

/// Uniform configuration shared by every sample of one render
#[derive(Debug, Clone)]
pub struct SongConfig {
    /// Output sample rate (Hz)
    /// Default 28160 = 110 workgroups of 256 per second
    pub sample_rate_hz: u32,

    /// Length of the rendered clip (seconds)
    pub duration_s: u32,

    /// Start of a partial render range (seconds)
    /// Carried to the GPU uniform block, not read by the kernel
    pub t0: u32,

    /// End of a partial render range (seconds)
    /// Carried to the GPU uniform block, not read by the kernel
    pub t1: u32,
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 28160,
            duration_s: 60,
            t0: 0,
            t1: 0,
        }
    }
}

impl SongConfig {
    pub fn new(sample_rate_hz: u32, duration_s: u32) -> Self {
        Self {
            sample_rate_hz,
            duration_s,
            ..Default::default()
        }
    }

    /// Number of stereo frames in the output buffer (one per dispatch index)
    pub fn total_samples(&self) -> usize {
        self.sample_rate_hz as usize * self.duration_s as usize
    }

    /// Elapsed time (seconds) of a dispatch index
    pub fn time_at(&self, index: usize) -> f32 {
        (index as f32 / self.total_samples() as f32) * self.duration_s as f32
    }

    /// Validate configuration (non-zero rate and duration, index fits in u32)
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate_hz == 0 {
            return Err("Sample rate must be > 0".to_string());
        }
        if self.duration_s == 0 {
            return Err("Duration must be > 0".to_string());
        }
        if self.sample_rate_hz.checked_mul(self.duration_s).is_none() {
            return Err(format!(
                "Too many samples: {} Hz x {} s overflows a 32-bit dispatch index",
                self.sample_rate_hz, self.duration_s
            ));
        }
        Ok(())
    }
}

/// Kernel constants (compile-time, mirrored in the WGSL shader)
pub mod song_constants {
    /// Threads per compute workgroup
    pub const NUM_THREADS_PER_GROUP: u32 = 256;

    /// Simultaneously evaluated melodic lines
    pub const VOICE_COUNT: usize = 3;

    /// Length of one melody unit (seconds)
    pub const UNIT_S: f32 = 0.18;

    /// Delay between adjacent voices at full stagger (seconds)
    /// Voice `i` starts `VOICE_STAGGER_S * i / (VOICE_COUNT - 1)` late
    pub const VOICE_STAGGER_S: f32 = 0.57;

    /// MIDI pitch of the tuning reference (A4)
    pub const REFERENCE_PITCH: f32 = 69.0;

    /// Frequency of the tuning reference (Hz)
    pub const REFERENCE_HZ: f32 = 440.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SongConfig::default();
        assert_eq!(config.total_samples(), 28160 * 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_time_at() {
        let config = SongConfig::new(1000, 2);

        assert_eq!(config.time_at(0), 0.0);
        assert!((config.time_at(1000) - 1.0).abs() < 1e-6);
        assert!((config.time_at(1500) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        assert!(SongConfig::new(0, 60).validate().is_err());
        assert!(SongConfig::new(44100, 0).validate().is_err());
        assert!(SongConfig::new(u32::MAX, 2).validate().is_err());
    }
}
