use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Primary keys are assigned by the PMS, so none of these auto increment.
        // A booking may reference a room, room type or guest that failed to
        // fetch, so only booking_guest.booking_id is a foreign key.

        // Create room_types table
        manager
            .create_table(
                Table::create()
                    .table(RoomTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomTypes::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomTypes::Name).string().not_null())
                    .col(ColumnDef::new(RoomTypes::Description).text())
                    .col(
                        ColumnDef::new(RoomTypes::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RoomTypes::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create rooms table
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Number).string().not_null())
                    .col(ColumnDef::new(Rooms::Floor).integer().not_null())
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create guests table
        manager
            .create_table(
                Table::create()
                    .table(Guests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guests::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guests::FirstName).string().not_null())
                    .col(ColumnDef::new(Guests::LastName).string().not_null())
                    .col(ColumnDef::new(Guests::Email).string().not_null())
                    .col(
                        ColumnDef::new(Guests::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Guests::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bookings table
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::ExternalId).string().not_null())
                    .col(ColumnDef::new(Bookings::ArrivalDate).date().not_null())
                    .col(ColumnDef::new(Bookings::DepartureDate).date().not_null())
                    .col(ColumnDef::new(Bookings::RoomId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::RoomTypeId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::Status).text().not_null())
                    .col(ColumnDef::new(Bookings::Notes).text())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create booking_guest junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(BookingGuest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingGuest::BookingId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookingGuest::GuestId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk-booking_guest")
                            .col(BookingGuest::BookingId)
                            .col(BookingGuest::GuestId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_guest-booking_id")
                            .from(BookingGuest::Table, BookingGuest::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(BookingGuest::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(RoomTypes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum RoomTypes {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    Number,
    Floor,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Guests {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    ExternalId,
    ArrivalDate,
    DepartureDate,
    RoomId,
    RoomTypeId,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BookingGuest {
    Table,
    BookingId,
    GuestId,
}
