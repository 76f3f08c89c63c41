//! Cross-collection enrollment rules.
//!
//! Two enrollment paths exist and they deliberately disagree on duplicates:
//! the client-centric batch `enroll` is idempotent, while the program-centric
//! `enroll_single` rejects a client who already holds the program.
//!
//! Deleting a program is two separate writes: remove the program, then pull
//! its id from every client. If the second write fails the program is gone
//! but some clients still reference it. Those ids are dropped when profiles
//! are assembled, so the window is tolerated rather than repaired.

use crate::models::{Client, EnrollmentSet};
use crate::services::RegistryStore;
use crate::utils::{parse_object_id, parse_object_ids};
use metrics::counter;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;

pub const PROGRAM_NOT_FOUND: &str = "Program not found";
pub const CLIENT_NOT_FOUND: &str = "Client not found";
pub const ALREADY_ENROLLED: &str = "Client already enrolled in this program";

#[derive(Clone)]
pub struct EnrollmentCoordinator {
    store: Arc<dyn RegistryStore>,
}

impl EnrollmentCoordinator {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// Adds `program_ids` to the client's set. Already-held ids are a no-op.
    /// Program existence is not checked; unknown ids surface as dangling
    /// references and are hidden from profiles.
    pub async fn enroll(
        &self,
        client_id: &str,
        program_ids: &[String],
    ) -> Result<EnrollmentSet, AppError> {
        let (client, program_ids) = self.load_for_update(client_id, program_ids).await?;

        let enrolled = client.enrolled_programs.union(&program_ids);
        self.store
            .set_enrolled_programs(&client.id, &enrolled)
            .await?;

        counter!("registry_enrollment_changes_total", "operation" => "enroll").increment(1);
        tracing::info!(
            client_id = %client.id,
            requested = program_ids.len(),
            enrolled = enrolled.len(),
            "Client enrolled in programs"
        );

        Ok(enrolled)
    }

    /// Removes `program_ids` from the client's set. Ids the client does not
    /// hold are ignored.
    pub async fn unenroll(
        &self,
        client_id: &str,
        program_ids: &[String],
    ) -> Result<EnrollmentSet, AppError> {
        let (client, program_ids) = self.load_for_update(client_id, program_ids).await?;

        let remaining = client.enrolled_programs.difference(&program_ids);
        self.store
            .set_enrolled_programs(&client.id, &remaining)
            .await?;

        counter!("registry_enrollment_changes_total", "operation" => "unenroll").increment(1);
        tracing::info!(
            client_id = %client.id,
            requested = program_ids.len(),
            enrolled = remaining.len(),
            "Client unenrolled from programs"
        );

        Ok(remaining)
    }

    /// Program-centric enrollment of one client. Unlike [`Self::enroll`] this
    /// fails when the client already holds the program. The write itself is
    /// an atomic set-insert.
    pub async fn enroll_single(&self, program_id: &str, client_id: &str) -> Result<Client, AppError> {
        let program_id = parse_object_id(program_id)?;
        let client_id = parse_object_id(client_id)?;

        self.store
            .find_program(&program_id)
            .await?
            .ok_or_else(|| AppError::not_found(PROGRAM_NOT_FOUND))?;

        let client = self
            .store
            .find_client(&client_id)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))?;

        if client.enrolled_programs.contains(&program_id) {
            tracing::info!(
                client_id = %client_id,
                program_id = %program_id,
                "Rejected duplicate enrollment"
            );
            return Err(AppError::bad_request(ALREADY_ENROLLED));
        }

        self.store
            .add_enrolled_program(&client_id, &program_id)
            .await?;

        counter!("registry_enrollment_changes_total", "operation" => "enroll_single").increment(1);
        tracing::info!(client_id = %client_id, program_id = %program_id, "Client enrolled in program");

        self.store
            .find_client(&client_id)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))
    }

    /// Deletes the program, then cascades the removal to every client.
    pub async fn delete_program(&self, program_id: &str) -> Result<u64, AppError> {
        let program_id = parse_object_id(program_id)?;

        if !self.store.delete_program(&program_id).await? {
            return Err(AppError::not_found(PROGRAM_NOT_FOUND));
        }
        tracing::info!(program_id = %program_id, "Program deleted");

        self.cascade_delete_program(&program_id).await.map_err(|e| {
            tracing::error!(
                program_id = %program_id,
                error = %e,
                "Cascade cleanup failed; clients keep dangling references"
            );
            e
        })
    }

    /// Pulls `program_id` out of every client's set, however many hold it.
    pub async fn cascade_delete_program(&self, program_id: &ObjectId) -> Result<u64, AppError> {
        let modified = self
            .store
            .remove_program_from_all_clients(program_id)
            .await?;

        counter!("registry_cascade_removals_total").increment(modified);
        tracing::info!(
            program_id = %program_id,
            clients_updated = modified,
            "Removed deleted program from client enrollments"
        );

        Ok(modified)
    }

    async fn load_for_update(
        &self,
        client_id: &str,
        program_ids: &[String],
    ) -> Result<(Client, Vec<ObjectId>), AppError> {
        let client_id = parse_object_id(client_id)?;
        let program_ids = parse_object_ids(program_ids)?;

        let client = self
            .store
            .find_client(&client_id)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))?;

        Ok((client, program_ids))
    }
}
