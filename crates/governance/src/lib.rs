#![deny(unused)]
//! Observability for the clinic assistant.
//!
//! This crate provides:
//! - Structured logging setup (plain or JSON)
//! - Prometheus metrics recorder and helpers

pub mod metrics;
pub mod tracing_layer;

pub use self::metrics::{setup_metrics_recorder, track_request, track_resolution, ResolutionOutcome};
pub use self::tracing_layer::configure_tracing;
