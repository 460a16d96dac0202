use crate::{config::Settings, error::SyncError};
use chrono::NaiveDate;
use database::{
    db::create_connection,
    services::{BookingService, SaveSummary, SyncBatch},
};
use log::{info, warn};
use models::{BookingRecord, GuestRecord, RoomRecord, RoomTypeRecord};
use pms_client::{PmsClient, Resource};
use sea_orm::DatabaseConnection;
use std::collections::{BTreeSet, HashSet};

/// Bookings fetched between two progress lines
const PROGRESS_EVERY: usize = 10;

/// Outcome of fetching one kind of related record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchCount {
    pub fetched: usize,
    pub failed: usize,
}

/// What a completed run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Distinct booking IDs returned by the listing
    pub discovered: usize,
    /// Bookings fetched and handed to the database
    pub synced: usize,
    /// Bookings that could not be fetched
    pub failed: usize,
    pub room_types: FetchCount,
    pub rooms: FetchCount,
    pub guests: FetchCount,
    /// Bookings written with a room, room type or guest that was not fetched
    pub dangling: usize,
    /// `None` when there was nothing to sync
    pub persisted: Option<SaveSummary>,
}

impl SyncReport {
    /// A run succeeds when every discovered booking was fetched
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// IDs referenced by the fetched bookings, deduplicated
#[derive(Debug, Default)]
struct References {
    room_types: BTreeSet<i64>,
    rooms: BTreeSet<i64>,
    guests: BTreeSet<i64>,
}

impl References {
    fn collect(&mut self, booking: &BookingRecord) {
        self.room_types.insert(booking.room_type_id);
        self.rooms.insert(booking.room_id);
        self.guests.extend(booking.guest_ids.iter().copied());
    }
}

/// Pulls bookings and everything they reference from the PMS into the database
pub struct BookingSync<'a> {
    client: PmsClient,
    db: &'a DatabaseConnection,
}

impl<'a> BookingSync<'a> {
    pub fn new(client: PmsClient, db: &'a DatabaseConnection) -> Self {
        Self { client, db }
    }

    /// Runs one sync
    ///
    /// Every request goes through the client's rate limiter, one at a time.
    /// Bookings and related records that fail to fetch are logged, counted
    /// and skipped. The records that were fetched are written in a single
    /// transaction, even when some bookings failed.
    ///
    /// # Arguments
    /// * `since` - Only sync bookings updated after this date
    ///
    /// # Returns
    /// A [`SyncReport`], or a [`SyncError`] when the booking listing or the
    /// database write failed
    pub async fn run(&mut self, since: Option<NaiveDate>) -> Result<SyncReport, SyncError> {
        info!("Fetching booking IDs from PMS API...");
        let listed = self
            .client
            .list_booking_ids(since)
            .await
            .map_err(SyncError::Discovery)?;

        let ids = unique_ids(&listed);
        if ids.len() < listed.len() {
            warn!(
                "Listing repeated {} booking IDs, each is synced once",
                listed.len() - ids.len()
            );
        }

        let mut report = SyncReport {
            discovered: ids.len(),
            ..Default::default()
        };

        if ids.is_empty() {
            info!("Nothing to sync.");
            return Ok(report);
        }

        info!("Found {} bookings to sync.", ids.len());

        let mut references = References::default();
        let mut bookings = Vec::with_capacity(ids.len());

        for (idx, &id) in ids.iter().enumerate() {
            match self.client.get_booking(id).await {
                Ok(booking) => {
                    references.collect(&booking);
                    bookings.push(booking);
                }
                Err(err) => {
                    warn!("Failed to fetch booking {id}: {err}");
                    report.failed += 1;
                }
            }

            let done = idx + 1;
            if done % PROGRESS_EVERY == 0 || done == ids.len() {
                info!("  Fetched {done}/{} bookings", ids.len());
            }
        }

        report.synced = bookings.len();

        info!("Fetching related room types, rooms, and guests...");
        let room_types: Vec<RoomTypeRecord> = self
            .fetch_all(&references.room_types, &mut report.room_types)
            .await;
        let rooms: Vec<RoomRecord> = self.fetch_all(&references.rooms, &mut report.rooms).await;
        let guests: Vec<GuestRecord> = self.fetch_all(&references.guests, &mut report.guests).await;

        let batch = SyncBatch {
            room_types,
            rooms,
            guests,
            bookings,
        };
        report.dangling = warn_dangling(&batch);

        info!("Upserting records into database...");
        let summary = BookingService::save_batch(self.db, batch)
            .await
            .map_err(SyncError::Persistence)?;
        report.persisted = Some(summary);

        info!(
            "Sync complete: {} bookings synced, {} failed.",
            report.synced, report.failed
        );
        Ok(report)
    }

    /// Fetches each ID in ascending order, skipping the ones that fail
    async fn fetch_all<R: Resource>(
        &mut self,
        ids: &BTreeSet<i64>,
        count: &mut FetchCount,
    ) -> Vec<R> {
        let mut records = Vec::with_capacity(ids.len());

        for &id in ids {
            match self.client.get::<R>(id).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!("Failed to fetch {} {id}: {err}", R::ENTITY);
                    count.failed += 1;
                }
            }
        }

        count.fetched = records.len();
        records
    }
}

/// Drops repeated IDs, keeping the first occurrence of each
fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Logs every booking that references a record missing from the batch
///
/// # Returns
/// The number of such bookings
fn warn_dangling(batch: &SyncBatch) -> usize {
    let room_types: HashSet<i64> = batch.room_types.iter().map(|r| r.id).collect();
    let rooms: HashSet<i64> = batch.rooms.iter().map(|r| r.id).collect();
    let guests: HashSet<i64> = batch.guests.iter().map(|g| g.id).collect();

    let mut dangling = 0;
    for booking in &batch.bookings {
        let mut missing = Vec::new();

        if !room_types.contains(&booking.room_type_id) {
            missing.push(format!("room type {}", booking.room_type_id));
        }
        if !rooms.contains(&booking.room_id) {
            missing.push(format!("room {}", booking.room_id));
        }
        missing.extend(
            booking
                .guest_ids
                .iter()
                .filter(|id| !guests.contains(id))
                .map(|id| format!("guest {id}")),
        );

        if !missing.is_empty() {
            warn!(
                "Booking {} references records that could not be fetched: {}",
                booking.id,
                missing.join(", ")
            );
            dangling += 1;
        }
    }

    dangling
}

/// Connects to the configured database and PMS and runs one sync
pub async fn sync_bookings(
    settings: &Settings,
    since: Option<NaiveDate>,
) -> Result<SyncReport, SyncError> {
    let db = create_connection(&settings.database_url)
        .await
        .map_err(SyncError::Connection)?;
    let client = PmsClient::new(settings.pms.clone()).map_err(SyncError::Client)?;

    info!(
        "Syncing from {} at most one request every {:?}",
        client.base_url(),
        settings.pms.min_interval
    );

    BookingSync::new(client, &db).run(since).await
}
