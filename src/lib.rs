//! Songkernel library - procedural polyphonic song rendered by a compute kernel

pub mod backend;
pub mod cli;
pub mod params;
pub mod synth;
pub mod wav;
