//! # Composition Module
//!
//! The engine drives the five pipeline stages in order; the compositor
//! assembles the normalized frames and resolved audio into the final
//! artifact through external ffmpeg.

pub mod compositor;
pub mod engine;

pub use compositor::{Compositor, TimelapseArtifact};
pub use engine::{RunRequest, TimelapseEngine};
