use serde::de::DeserializeOwned;
use serde_json::Value;

/// A payload the PMS serves for a single entity
pub trait Record: DeserializeOwned {
    /// Entity name used in logs and error messages
    const ENTITY: &'static str;

    /// The PMS-assigned identifier, reused as the local primary key
    fn id(&self) -> i64;

    /// Parses a JSON response body into the record
    ///
    /// # Arguments
    /// * `value` - The decoded response body
    ///
    /// # Returns
    /// The record, or the deserialization error describing the malformed field
    fn parse(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
