//! Image classification router worker.
//!
//! This crate provides:
//! - The classify-then-decide handler core and three-way routing
//! - A polling trigger adapter over the source prefix
//! - Worker configuration and error taxonomy
//! - Prometheus metrics for routed dispositions

pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod ports;
pub mod trigger;

#[cfg(test)]
pub(crate) mod testing;

pub use config::RouterConfig;
pub use error::{RouterError, RouterResult};
pub use handler::ClassificationRouter;
pub use ports::{Classifier, ObjectStore};
pub use trigger::SourcePoller;
