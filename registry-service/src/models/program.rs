use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A named health-management track clients can be enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Program {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            description,
        }
    }
}
