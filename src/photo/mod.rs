//! # Photo Module
//!
//! Turns a directory of still photos into an ordered, uniformly sized frame
//! set. Lexicographic filename order is the temporal order of the timelapse;
//! normalization preserves it by writing zero-padded sequential frame names.

pub mod exif;
pub mod normalizer;
pub mod types;

pub use normalizer::Normalizer;
pub use types::{NormalizedPhotoSet, PhotoSet};
