//! The staged resolution pipeline: projection normalization, column
//! resolution, and feature packaging. Classification lives in
//! [`crate::classify`]; final assembly lives in [`crate::map`].

pub mod columns;
pub mod normalize;
pub mod package;
