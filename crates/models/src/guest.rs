use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Record for GuestRecord {
    const ENTITY: &'static str = "guest";

    fn id(&self) -> i64 {
        self.id
    }
}
