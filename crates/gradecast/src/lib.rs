//! Weighted-factor grade prediction for instructor dashboards.
//!
//! The [`scoring`] module is a pure, synchronous engine turning raw student
//! metrics into a [`scoring::PredictionResult`]. [`predictions`] wraps it with
//! request validation, storage, and HTTP routes.

pub mod config;
pub mod error;
pub mod predictions;
pub mod scoring;
pub mod telemetry;
