pub mod clients;
pub mod programs;

use serde::{Deserialize, Serialize};

pub use clients::{ClientProfile, ClientRecordResponse, ProgramSummary, RegisterClientRequest};
pub use programs::{CreateProgramRequest, EnrollClientParams, ProgramResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply of the program-centric enroll: a message plus the updated record.
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub message: String,
    pub client: ClientRecordResponse,
}
