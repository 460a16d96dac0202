use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_guest::Entity")]
    BookingGuests,
}

impl Related<super::booking_guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingGuests.def()
    }
}

// Many-to-many relationship with bookings
impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_guest::Relation::Booking.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_guest::Relation::Guest.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
