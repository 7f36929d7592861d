//! Core data models for contest submission analytics.

mod ids;
mod submission;
mod views;

pub use ids::*;
pub use submission::*;
pub use views::*;
