use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Lifecycle state of a booking as reported by the PMS
///
/// The PMS documents four states but treats the field as an open string, so
/// anything else is kept verbatim in [`BookingStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    #[strum(default)]
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Other(status) => status,
            known => known.as_ref(),
        }
    }

    /// Whether the status is one of the documented PMS states
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for BookingStatus {
    fn from(status: String) -> Self {
        Self::from_str(&status).unwrap_or(Self::Other(status))
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Other(status) => status,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for BookingStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => Ok(Self::from(*s)),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "BookingStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<BookingStatus> for Value {
    fn from(status: BookingStatus) -> Self {
        Value::String(Some(Box::new(status.into())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for BookingStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;
        Ok(Self::from(val))
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for BookingStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(BookingStatus::from("confirmed".to_string()), BookingStatus::Confirmed);
        assert_eq!(BookingStatus::from("checked_in".to_string()), BookingStatus::CheckedIn);
        assert_eq!(BookingStatus::from("checked_out".to_string()), BookingStatus::CheckedOut);
        assert_eq!(BookingStatus::from("cancelled".to_string()), BookingStatus::Cancelled);
        assert_eq!(BookingStatus::CheckedIn.to_string(), "checked_in");
    }

    #[test]
    fn test_unknown_status_is_kept_verbatim() {
        let status = BookingStatus::from("no_show".to_string());
        assert_eq!(status, BookingStatus::Other("no_show".to_string()));
        assert!(!status.is_known());
        assert_eq!(status.as_str(), "no_show");

        // Matching is exact, the PMS value is never normalised
        let status = BookingStatus::from("Confirmed".to_string());
        assert_eq!(status, BookingStatus::Other("Confirmed".to_string()));
        assert_eq!(String::from(status), "Confirmed");
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("checked_in".parse::<BookingStatus>(), Ok(BookingStatus::CheckedIn));
        assert_eq!(
            BookingStatus::try_from("cancelled"),
            Ok(BookingStatus::Cancelled)
        );
        assert_eq!(
            BookingStatus::try_from("no_show"),
            Ok(BookingStatus::Other("no_show".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let status: BookingStatus = serde_json::from_str("\"checked_out\"").unwrap();
        assert_eq!(status, BookingStatus::CheckedOut);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"checked_out\"");

        let status: BookingStatus = serde_json::from_str("\"waitlisted\"").unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"waitlisted\"");
    }
}
