use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes on the booking foreign keys for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_id")
                    .table(Bookings::Table)
                    .col(Bookings::RoomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_type_id")
                    .table(Bookings::Table)
                    .col(Bookings::RoomTypeId)
                    .to_owned(),
            )
            .await?;

        // Lookups by the channel's reference and by status
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_external_id")
                    .table(Bookings::Table)
                    .col(Bookings::ExternalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        // The composite primary key already covers booking_id first
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_guest_guest_id")
                    .table(BookingGuest::Table)
                    .col(BookingGuest::GuestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(
                Index::drop()
                    .name("idx_booking_guest_guest_id")
                    .table(BookingGuest::Table)
                    .to_owned(),
            )
            .await?;

        for name in [
            "idx_bookings_status",
            "idx_bookings_external_id",
            "idx_bookings_room_type_id",
            "idx_bookings_room_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Bookings::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    RoomId,
    RoomTypeId,
    ExternalId,
    Status,
}

#[derive(Iden)]
enum BookingGuest {
    Table,
    GuestId,
}
