//! Store accessors for the `programs` and `clients` collections.
//!
//! Each method is a single-document (or single `update_many`) operation.
//! Nothing here spans collections; cross-collection rules live in
//! [`crate::services::EnrollmentCoordinator`].

use crate::models::{Client, EnrollmentSet, Program};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

#[async_trait]
pub trait ProgramStore: Send + Sync {
    async fn insert_program(&self, program: &Program) -> Result<(), AppError>;

    async fn find_program(&self, id: &ObjectId) -> Result<Option<Program>, AppError>;

    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, AppError>;

    /// All programs in natural store order.
    async fn list_programs(&self) -> Result<Vec<Program>, AppError>;

    /// Returns `false` when no program had this id.
    async fn delete_program(&self, id: &ObjectId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn insert_client(&self, client: &Client) -> Result<(), AppError>;

    async fn find_client(&self, id: &ObjectId) -> Result<Option<Client>, AppError>;

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, AppError>;

    /// All clients in natural store order.
    async fn list_clients(&self) -> Result<Vec<Client>, AppError>;

    /// Overwrites the whole enrollment set of one client. Concurrent writers
    /// race; the last write wins.
    async fn set_enrolled_programs(
        &self,
        client_id: &ObjectId,
        programs: &EnrollmentSet,
    ) -> Result<(), AppError>;

    /// Atomic set-insert of a single program id (`$addToSet`).
    async fn add_enrolled_program(
        &self,
        client_id: &ObjectId,
        program_id: &ObjectId,
    ) -> Result<(), AppError>;

    /// Pulls `program_id` out of every client holding it; returns how many
    /// clients were modified.
    async fn remove_program_from_all_clients(&self, program_id: &ObjectId)
        -> Result<u64, AppError>;
}

/// The full store handle injected into the application state.
#[async_trait]
pub trait RegistryStore: ProgramStore + ClientStore {
    async fn health_check(&self) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}
