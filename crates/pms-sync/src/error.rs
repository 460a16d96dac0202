use crate::config::ConfigError;
use pms_client::FetchError;
use sea_orm::DbErr;
use thiserror::Error;

/// Reasons a sync run stops before writing anything
///
/// Failures to fetch single bookings or related records are not errors here;
/// they are counted in the [`SyncReport`](crate::SyncReport).
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not build the PMS client: {0}")]
    Client(#[source] FetchError),

    #[error("failed to fetch booking IDs: {0}")]
    Discovery(#[source] FetchError),

    #[error("could not connect to the database: {0}")]
    Connection(#[source] DbErr),

    #[error("failed to save synced records: {0}")]
    Persistence(#[source] DbErr),
}
