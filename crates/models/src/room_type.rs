use crate::record::Record;
use serde::{Deserialize, Serialize};

/// A category of room, e.g. "Deluxe Suite"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for RoomTypeRecord {
    const ENTITY: &'static str = "room type";

    fn id(&self) -> i64 {
        self.id
    }
}
