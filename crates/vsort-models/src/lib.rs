//! Shared data models for the VisionSort classification router.
//!
//! This crate provides:
//! - Tag types returned by the image-analysis service
//! - The pure "contains target tag" classification rule
//! - The three-way routing disposition and its destination keys
//! - The in-memory artifact passed through the pipeline

pub mod artifact;
pub mod disposition;
pub mod tag;

pub use artifact::Artifact;
pub use disposition::Disposition;
pub use tag::{contains_target, Tag, DEFAULT_CONFIDENCE_THRESHOLD};
