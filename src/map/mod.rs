//! The composed map artifact and final assembly.

pub mod artifact;
pub mod compose;

pub use artifact::{FeatureRecord, MapDocument, MapOptions, VectorLayer};
