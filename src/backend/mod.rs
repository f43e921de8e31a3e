//! Dispatch of the song kernel on the host (rayon) or the GPU (wgpu).

pub mod cpu;
pub mod gpu;

use crate::params::SongConfig;
use crate::synth::unpack_stereo;

// Re-export public types
pub use gpu::{ComputeSystem, SongUniforms};

/// Where the kernel runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Cpu,
    Gpu,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Cpu => "cpu",
            Backend::Gpu => "gpu",
        }
    }
}

/// Render the whole song into packed stereo frames
pub fn render(backend: Backend, config: &SongConfig) -> Result<Vec<u32>, String> {
    match backend {
        Backend::Cpu => cpu::render(config),
        Backend::Gpu => pollster::block_on(async {
            let system = ComputeSystem::new().await?;
            system.render(config).await
        }),
    }
}

/// Largest per-channel difference between two renders (16-bit steps)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deviation {
    pub max_left: u16,
    pub max_right: u16,
    /// Frames that differ at all
    pub differing: usize,
}

/// Compare two renders frame by frame (extra frames in the longer one are ignored)
pub fn compare(a: &[u32], b: &[u32]) -> Deviation {
    a.iter()
        .zip(b)
        .fold(Deviation::default(), |mut dev, (&fa, &fb)| {
            let (la, ra) = unpack_stereo(fa);
            let (lb, rb) = unpack_stereo(fb);
            let dl = (la as i32 - lb as i32).unsigned_abs() as u16;
            let dr = (ra as i32 - rb as i32).unsigned_abs() as u16;
            dev.max_left = dev.max_left.max(dl);
            dev.max_right = dev.max_right.max(dr);
            if fa != fb {
                dev.differing += 1;
            }
            dev
        })
}
