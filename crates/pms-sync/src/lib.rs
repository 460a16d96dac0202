pub mod config;
pub mod error;
pub mod sync;

pub use config::{ConfigError, Settings};
pub use error::SyncError;
pub use sync::{BookingSync, FetchCount, SyncReport, sync_bookings};
