//! Bing-Search-RS: a Bing Web, News and Entity search client
//!
//! Queries each enabled category endpoint, normalizes the provider's JSON
//! into uniform records, and optionally renders them as tagged markup for
//! use as language-model prompt context.

pub mod config;
pub mod engines;
pub mod error;
pub mod network;
pub mod results;
pub mod search;
pub mod tool;

pub use config::Settings;
pub use engines::Engine;
pub use error::{Result, SearchError};
pub use results::{Category, SearchOutput, SearchResult};
pub use search::{Freshness, Search, SearchQuery};
pub use tool::SearchTool;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for each endpoint request in seconds
pub const DEFAULT_TIMEOUT: u64 = 20;

/// Default number of results requested per category
pub const DEFAULT_MAX_RESULTS: u32 = 3;

/// Default market code
pub const DEFAULT_LOCALE: &str = "en-US";
