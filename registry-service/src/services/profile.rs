//! Expands a client's raw enrollment ids into `{id, name}` summaries.
//!
//! Ids whose program no longer exists are dropped from the profile rather
//! than reported. A cascade delete that failed halfway therefore never shows
//! up as a broken profile, only as a stale id in storage.

use crate::dtos::{ClientProfile, ProgramSummary};
use crate::models::Client;
use crate::services::RegistryStore;
use service_core::error::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileAssembler {
    store: Arc<dyn RegistryStore>,
}

impl ProfileAssembler {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// One program lookup per enrolled id, sequentially.
    pub async fn assemble(&self, client: Client) -> Result<ClientProfile, AppError> {
        let mut enrolled_programs = Vec::with_capacity(client.enrolled_programs.len());

        for program_id in client.enrolled_programs.iter() {
            match self.store.find_program(program_id).await? {
                Some(program) => enrolled_programs.push(ProgramSummary {
                    id: program.id.to_hex(),
                    name: program.name,
                }),
                None => {
                    tracing::debug!(
                        client_id = %client.id,
                        program_id = %program_id,
                        "Dropping dangling enrollment from profile"
                    );
                }
            }
        }

        Ok(ClientProfile {
            id: client.id.to_hex(),
            first_name: client.first_name,
            last_name: client.last_name,
            email: client.email,
            enrolled_programs,
        })
    }

    pub async fn assemble_all(&self, clients: Vec<Client>) -> Result<Vec<ClientProfile>, AppError> {
        let mut profiles = Vec::with_capacity(clients.len());
        for client in clients {
            profiles.push(self.assemble(client).await?);
        }
        Ok(profiles)
    }
}
