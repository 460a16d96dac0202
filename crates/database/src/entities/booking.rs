use models::BookingStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub external_id: String,
    pub arrival_date: Date,
    pub departure_date: Date,
    pub room_id: i64,
    pub room_type_id: i64,
    #[sea_orm(column_type = "Text")]
    pub status: BookingStatus,
    #[sea_orm(column_type = "Text")]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::room_type::Entity",
        from = "Column::RoomTypeId",
        to = "super::room_type::Column::Id"
    )]
    RoomType,
    #[sea_orm(has_many = "super::booking_guest::Entity")]
    BookingGuests,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::room_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomType.def()
    }
}

impl Related<super::booking_guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingGuests.def()
    }
}

// Many-to-many relationship with guests
impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_guest::Relation::Guest.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_guest::Relation::Booking.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
