//! Procedural song synthesis: melody lookup, instrument, stereo mix, PCM packing.
//!
//! Every output sample is a pure function of its dispatch index, so the same
//! code serves as the CPU backend and as the reference for the GPU kernel.

pub mod instrument;
pub mod melody;
pub mod mix;
pub mod pcm;

// Re-export public types
pub use melody::{lookup, NoteEvent, NoteMatch, MELODY};
pub use mix::{mix_at, render_frame};
pub use pcm::{pack_stereo, unpack_stereo};
