//! Rate-limited client for the hotel PMS REST API

pub mod client;
pub mod error;
pub mod fetchers;
pub mod rate_limit;

pub use client::{ClientConfig, PmsClient};
pub use error::FetchError;
pub use fetchers::Resource;
pub use rate_limit::RateLimiter;
