use crate::{booking_status::BookingStatus, record::Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A reservation as served by `/api/bookings/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    pub external_id: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub room_id: i64,
    pub room_type_id: i64,
    /// Guests staying under this booking. Only used to rebuild the
    /// booking/guest association, never stored on the booking row.
    pub guest_ids: Vec<i64>,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for BookingRecord {
    const ENTITY: &'static str = "booking";

    fn id(&self) -> i64 {
        self.id
    }
}
