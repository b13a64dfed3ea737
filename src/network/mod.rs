//! HTTP networking module
//!
//! Provides the authenticated HTTP client used to reach the search provider.

mod client;

pub use client::{HttpClient, SUBSCRIPTION_KEY_HEADER};
