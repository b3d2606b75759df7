//! # Audio Module
//!
//! Resolves the configured audio source into a single canonical audio
//! artifact with a known duration. Sources come in three shapes: absent,
//! a local audio file, or a remote video reference whose audio track gets
//! extracted after a full fetch. Trim windows that cannot be honored fall
//! back to the full source with a warning.

pub mod fetch;
pub mod probe;
pub mod resolver;
pub mod types;

pub use resolver::AudioResolver;
pub use types::{AudioSource, AudioTrack, TrimWindow};
