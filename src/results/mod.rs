//! Result types and tagged rendering for search results
//!
//! This module defines the uniform records every provider response is
//! normalized into, and the markup form they can be rendered as.

mod tagging;
mod types;

pub use tagging::{escape_text, format_results, tag_result, tag_value};
pub use types::*;
