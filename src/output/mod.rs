//! Rendering of analysis reports and migration outcomes.

pub mod json;
pub mod terminal;

pub use json::output_json;
pub use terminal::{format_analysis, format_outcome};
