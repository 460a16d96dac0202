use crate::entities::{booking, booking_guest, guest, room, room_type};
use chrono::{NaiveDateTime, Utc};
use log::{debug, info};
use models::{BookingRecord, GuestRecord, RoomRecord, RoomTypeRecord};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::OnConflict,
};
use std::collections::BTreeSet;

/// Everything fetched from the PMS in one run, ready to be written
#[derive(Debug, Clone, Default)]
pub struct SyncBatch {
    pub room_types: Vec<RoomTypeRecord>,
    pub rooms: Vec<RoomRecord>,
    pub guests: Vec<GuestRecord>,
    pub bookings: Vec<BookingRecord>,
}

impl SyncBatch {
    pub fn is_empty(&self) -> bool {
        self.room_types.is_empty()
            && self.rooms.is_empty()
            && self.guests.is_empty()
            && self.bookings.is_empty()
    }
}

/// Row counts written by [`BookingService::save_batch`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub room_types: usize,
    pub rooms: usize,
    pub guests: usize,
    pub bookings: usize,
    /// Booking/guest links created across all bookings
    pub guests_attached: usize,
    /// Booking/guest links removed across all bookings
    pub guests_detached: usize,
}

/// The difference applied by [`BookingService::replace_guests`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestChanges {
    pub attached: Vec<i64>,
    pub detached: Vec<i64>,
}

impl GuestChanges {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }
}

pub struct BookingService;

impl BookingService {
    /// The number of rows written by a single multi-row insert
    const CHUNK_SIZE: usize = 200;

    /// Upserts a whole sync run in one transaction
    ///
    /// Rows are written in foreign key order: room types, rooms, guests, then
    /// bookings. Each booking's guest links are replaced right after the
    /// booking rows exist. Any error rolls back the entire batch.
    ///
    /// References to rooms, room types or guests that are not part of the
    /// batch are written as given. Within each list IDs must be unique, since
    /// one multi-row upsert cannot touch the same row twice.
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `batch` - The records fetched during this run
    ///
    /// # Returns
    /// Counts of the rows written
    pub async fn save_batch(
        db: &DatabaseConnection,
        batch: SyncBatch,
    ) -> Result<SaveSummary, DbErr> {
        let txn = db.begin().await?;
        let now = Utc::now().naive_utc();

        let mut summary = SaveSummary {
            room_types: Self::upsert_room_types(&txn, &batch.room_types, now).await?,
            rooms: Self::upsert_rooms(&txn, &batch.rooms, now).await?,
            guests: Self::upsert_guests(&txn, &batch.guests, now).await?,
            bookings: Self::upsert_bookings(&txn, &batch.bookings, now).await?,
            ..Default::default()
        };

        for (idx, record) in batch.bookings.iter().enumerate() {
            if idx > 0 && idx % 100 == 0 {
                debug!("  Linked guests for {idx} bookings");
            }

            let changes = Self::replace_guests(&txn, record.id, &record.guest_ids).await?;
            summary.guests_attached += changes.attached.len();
            summary.guests_detached += changes.detached.len();
        }

        txn.commit().await?;

        info!(
            "Saved {} room types, {} rooms, {} guests, {} bookings ({} guest links added, {} removed)",
            summary.room_types,
            summary.rooms,
            summary.guests,
            summary.bookings,
            summary.guests_attached,
            summary.guests_detached
        );
        Ok(summary)
    }

    /// Makes the guests linked to a booking exactly `guest_ids`
    ///
    /// Links missing from `guest_ids` are removed, new ones are added and
    /// existing ones are left untouched, so repeating a call is a no-op.
    /// Duplicate IDs collapse.
    ///
    /// # Arguments
    /// * `conn` - A connection or an open transaction
    /// * `booking_id` - The booking whose guests are replaced
    /// * `guest_ids` - The complete new guest set
    ///
    /// # Returns
    /// The guest IDs that were attached and detached
    pub async fn replace_guests<C>(
        conn: &C,
        booking_id: i64,
        guest_ids: &[i64],
    ) -> Result<GuestChanges, DbErr>
    where
        C: ConnectionTrait,
    {
        let current: BTreeSet<i64> = Self::guest_ids_for(conn, booking_id)
            .await?
            .into_iter()
            .collect();
        let wanted: BTreeSet<i64> = guest_ids.iter().copied().collect();

        let changes = GuestChanges {
            attached: wanted.difference(&current).copied().collect(),
            detached: current.difference(&wanted).copied().collect(),
        };

        if !changes.detached.is_empty() {
            booking_guest::Entity::delete_many()
                .filter(booking_guest::Column::BookingId.eq(booking_id))
                .filter(booking_guest::Column::GuestId.is_in(changes.detached.clone()))
                .exec(conn)
                .await?;
        }

        if !changes.attached.is_empty() {
            let links = changes
                .attached
                .iter()
                .map(|&guest_id| booking_guest::ActiveModel {
                    booking_id: Set(booking_id),
                    guest_id: Set(guest_id),
                });

            booking_guest::Entity::insert_many(links)
                .exec_without_returning(conn)
                .await?;
        }

        Ok(changes)
    }

    /// The guest IDs currently linked to a booking, in ascending order
    pub async fn guest_ids_for<C>(conn: &C, booking_id: i64) -> Result<Vec<i64>, DbErr>
    where
        C: ConnectionTrait,
    {
        booking_guest::Entity::find()
            .select_only()
            .column(booking_guest::Column::GuestId)
            .filter(booking_guest::Column::BookingId.eq(booking_id))
            .order_by_asc(booking_guest::Column::GuestId)
            .into_tuple::<i64>()
            .all(conn)
            .await
    }

    async fn upsert_room_types<C>(
        conn: &C,
        records: &[RoomTypeRecord],
        now: NaiveDateTime,
    ) -> Result<usize, DbErr>
    where
        C: ConnectionTrait,
    {
        let models = records
            .iter()
            .map(|record| room_type::ActiveModel {
                id: Set(record.id),
                name: Set(record.name.clone()),
                description: Set(record.description.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        let on_conflict = OnConflict::column(room_type::Column::Id)
            .update_columns([
                room_type::Column::Name,
                room_type::Column::Description,
                room_type::Column::UpdatedAt,
            ])
            .to_owned();

        Self::upsert_chunked(conn, models, on_conflict).await
    }

    async fn upsert_rooms<C>(
        conn: &C,
        records: &[RoomRecord],
        now: NaiveDateTime,
    ) -> Result<usize, DbErr>
    where
        C: ConnectionTrait,
    {
        let models = records
            .iter()
            .map(|record| room::ActiveModel {
                id: Set(record.id),
                number: Set(record.number.clone()),
                floor: Set(record.floor),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        let on_conflict = OnConflict::column(room::Column::Id)
            .update_columns([
                room::Column::Number,
                room::Column::Floor,
                room::Column::UpdatedAt,
            ])
            .to_owned();

        Self::upsert_chunked(conn, models, on_conflict).await
    }

    async fn upsert_guests<C>(
        conn: &C,
        records: &[GuestRecord],
        now: NaiveDateTime,
    ) -> Result<usize, DbErr>
    where
        C: ConnectionTrait,
    {
        let models = records
            .iter()
            .map(|record| guest::ActiveModel {
                id: Set(record.id),
                first_name: Set(record.first_name.clone()),
                last_name: Set(record.last_name.clone()),
                email: Set(record.email.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        let on_conflict = OnConflict::column(guest::Column::Id)
            .update_columns([
                guest::Column::FirstName,
                guest::Column::LastName,
                guest::Column::Email,
                guest::Column::UpdatedAt,
            ])
            .to_owned();

        Self::upsert_chunked(conn, models, on_conflict).await
    }

    async fn upsert_bookings<C>(
        conn: &C,
        records: &[BookingRecord],
        now: NaiveDateTime,
    ) -> Result<usize, DbErr>
    where
        C: ConnectionTrait,
    {
        let models = records
            .iter()
            .map(|record| Self::booking_to_active_model(record, now))
            .collect();

        let on_conflict = OnConflict::column(booking::Column::Id)
            .update_columns([
                booking::Column::ExternalId,
                booking::Column::ArrivalDate,
                booking::Column::DepartureDate,
                booking::Column::RoomId,
                booking::Column::RoomTypeId,
                booking::Column::Status,
                booking::Column::Notes,
                booking::Column::UpdatedAt,
            ])
            .to_owned();

        Self::upsert_chunked(conn, models, on_conflict).await
    }

    /// Writes `models` in chunks of [`Self::CHUNK_SIZE`] rows
    async fn upsert_chunked<A, C>(
        conn: &C,
        models: Vec<A>,
        on_conflict: OnConflict,
    ) -> Result<usize, DbErr>
    where
        A: ActiveModelTrait,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
        C: ConnectionTrait,
    {
        let total = models.len();
        let mut models = models.into_iter().peekable();

        while models.peek().is_some() {
            let chunk: Vec<A> = models.by_ref().take(Self::CHUNK_SIZE).collect();

            <A::Entity as EntityTrait>::insert_many(chunk)
                .on_conflict(on_conflict.clone())
                .exec_without_returning(conn)
                .await?;
        }

        Ok(total)
    }

    fn booking_to_active_model(
        record: &BookingRecord,
        now: NaiveDateTime,
    ) -> booking::ActiveModel {
        booking::ActiveModel {
            id: Set(record.id),
            external_id: Set(record.external_id.clone()),
            arrival_date: Set(record.arrival_date),
            departure_date: Set(record.departure_date),

            // Written even when the referenced row was not fetched in this run
            room_id: Set(record.room_id),
            room_type_id: Set(record.room_type_id),

            status: Set(record.status.clone()),
            notes: Set(record.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
