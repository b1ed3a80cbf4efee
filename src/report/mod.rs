//! Report rendering.
//!
//! Rendering is kept apart from computation: a
//! [`ReconciliationReport`](crate::models::ReconciliationReport) is built once
//! and then written as text or JSON.

mod currency;
mod json;
mod text;

pub use currency::format_currency;
pub use json::render_json;
pub use text::{SEPARATOR_WIDTH, render_text, write_text};
