//! Search engine module
//!
//! Defines the Engine trait and the Bing category engines.

mod traits;

pub mod bing;

pub use bing::{BingEntities, BingNews, BingWeb, ENTITY_MARKET};
pub use traits::*;
