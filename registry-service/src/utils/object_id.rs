//! Identifier checks applied before any lookup.
//!
//! Only the format is checked here: 24 hex characters, the textual form of a
//! MongoDB ObjectId. Whether the record exists is the store's concern.

use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

pub const INVALID_ID_MESSAGE: &str = "Invalid ID format";

pub fn is_valid_object_id(value: &str) -> bool {
    ObjectId::parse_str(value).is_ok()
}

pub fn parse_object_id(value: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value).map_err(|_| {
        tracing::debug!(id = %value, "Rejected malformed identifier");
        AppError::bad_request(INVALID_ID_MESSAGE)
    })
}

/// Fails on the first malformed id; nothing is looked up until all pass.
pub fn parse_object_ids(values: &[String]) -> Result<Vec<ObjectId>, AppError> {
    values.iter().map(|value| parse_object_id(value)).collect()
}
