use crate::record::Record;
use serde::{Deserialize, Serialize};

/// A physical room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: i64,
    /// Door number, kept as a string since the PMS allows e.g. "12A"
    pub number: String,
    pub floor: i32,
}

impl Record for RoomRecord {
    const ENTITY: &'static str = "room";

    fn id(&self) -> i64 {
        self.id
    }
}
