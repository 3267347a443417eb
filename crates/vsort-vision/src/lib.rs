//! Client for the remote image-analysis service.
//!
//! This crate provides:
//! - A reqwest-based client posting raw image bytes to the analysis endpoint
//! - Parsing of the tag results into [`vsort_models::Tag`]
//! - A typed error taxonomy for transport, API, and parse failures

pub mod client;
pub mod error;

pub use client::{VisionClient, VisionConfig};
pub use error::{VisionError, VisionResult};
