//! Search orchestration module
//!
//! Runs the enabled category searches for a query and merges their
//! results in a fixed category order.

mod executor;
mod models;

pub use executor::Search;
pub use models::*;
