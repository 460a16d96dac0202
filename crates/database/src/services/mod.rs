pub mod booking;

pub use booking::{BookingService, GuestChanges, SaveSummary, SyncBatch};
