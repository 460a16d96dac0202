pub mod booking;
pub mod booking_guest;
pub mod guest;
pub mod room;
pub mod room_type;
