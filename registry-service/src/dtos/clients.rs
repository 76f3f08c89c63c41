use crate::models::Client;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterClientRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// `{id, name}` pair a profile shows for each live enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramSummary {
    pub id: String,
    pub name: String,
}

/// Client as returned to callers: enrollments expanded into summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrolled_programs: Vec<ProgramSummary>,
}

/// Client as stored, with raw program ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRecordResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrolled_programs: Vec<String>,
}

impl From<Client> for ClientRecordResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.to_hex(),
            enrolled_programs: client.enrolled_programs.to_hex_vec(),
            first_name: client.first_name,
            last_name: client.last_name,
            email: client.email,
        }
    }
}
