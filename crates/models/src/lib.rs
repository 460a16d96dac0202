//! Typed records for the payloads served by the PMS API

pub mod booking;
pub mod booking_status;
pub mod guest;
pub mod record;
pub mod room;
pub mod room_type;

pub use booking::BookingRecord;
pub use booking_status::BookingStatus;
pub use guest::GuestRecord;
pub use record::Record;
pub use room::RoomRecord;
pub use room_type::RoomTypeRecord;
