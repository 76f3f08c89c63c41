use super::EnrollmentSet;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A patient record. Enrollment changes go through the enrollment coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub enrolled_programs: EnrollmentSet,
}

impl Client {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            id: ObjectId::new(),
            first_name,
            last_name,
            email,
            enrolled_programs: EnrollmentSet::new(),
        }
    }
}
