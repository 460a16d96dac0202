use crate::{client::PmsClient, error::FetchError};
use chrono::NaiveDate;
use models::{BookingRecord, GuestRecord, Record, RoomRecord, RoomTypeRecord};
use serde::Deserialize;

/// A [`Record`] served by the PMS at `{COLLECTION}/{id}`
pub trait Resource: Record {
    const COLLECTION: &'static str;
}

impl Resource for BookingRecord {
    const COLLECTION: &'static str = "/api/bookings";
}

impl Resource for RoomRecord {
    const COLLECTION: &'static str = "/api/rooms";
}

impl Resource for RoomTypeRecord {
    const COLLECTION: &'static str = "/api/room-types";
}

impl Resource for GuestRecord {
    const COLLECTION: &'static str = "/api/guests";
}

/// Body of the booking listing endpoint
#[derive(Debug, Deserialize)]
struct BookingIdPage {
    #[serde(default)]
    data: Option<Vec<i64>>,
}

impl PmsClient {
    /// Lists the IDs of all bookings, optionally only those updated after a date
    ///
    /// # Arguments
    /// * `since` - When set, sent as `updated_at.gt=YYYY-MM-DD`
    ///
    /// # Returns
    /// The `data` array of the response, or an empty list when it is absent
    pub async fn list_booking_ids(
        &mut self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<i64>, FetchError> {
        let query: Vec<(&str, String)> = since
            .map(|date| ("updated_at.gt", date.format("%Y-%m-%d").to_string()))
            .into_iter()
            .collect();

        let body = self.fetch_json(BookingRecord::COLLECTION, &query).await?;
        let page: BookingIdPage =
            serde_json::from_value(body).map_err(|source| FetchError::Malformed {
                entity: "booking list",
                path: BookingRecord::COLLECTION.to_string(),
                source,
            })?;

        Ok(page.data.unwrap_or_default())
    }

    pub async fn get_booking(&mut self, id: i64) -> Result<BookingRecord, FetchError> {
        self.get(id).await
    }

    pub async fn get_room(&mut self, id: i64) -> Result<RoomRecord, FetchError> {
        self.get(id).await
    }

    pub async fn get_room_type(&mut self, id: i64) -> Result<RoomTypeRecord, FetchError> {
        self.get(id).await
    }

    pub async fn get_guest(&mut self, id: i64) -> Result<GuestRecord, FetchError> {
        self.get(id).await
    }

    /// Fetches a single entity by ID and parses it into its record type
    pub async fn get<R: Resource>(&mut self, id: i64) -> Result<R, FetchError> {
        let path = format!("{}/{id}", R::COLLECTION);
        let body = self.fetch_json(&path, &[]).await?;

        R::parse(body).map_err(|source| FetchError::Malformed {
            entity: R::ENTITY,
            path,
            source,
        })
    }
}
