//! # Contest Dash
//!
//! Descriptive analytics over coding-contest submission logs.
//!
//! ## Architecture
//!
//! - **models**: Submission rows, the table snapshot and derived view types
//! - **storage**: CSV loading with schema validation, and CSV export
//! - **calculate**: The aggregation engine (pure functions over a table)
//! - **present**: The presentation boundary (JSON and text presenters)
//! - **api**: REST API with per-upload sessions
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod present;
pub mod storage;

pub use models::*;
