use crate::models::Program;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProgramRequest {
    #[validate(length(min = 1, message = "Program name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id.to_hex(),
            name: program.name,
            description: program.description,
        }
    }
}

/// `?client_id=` on the program-centric enroll route.
#[derive(Debug, Deserialize)]
pub struct EnrollClientParams {
    pub client_id: String,
}
