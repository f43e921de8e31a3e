//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (seconds, Hz, etc.)
//! - Documented ranges and meanings

mod output;
mod song;

// Re-export all types
pub use output::OutputConfig;
pub use song::{song_constants, SongConfig};
