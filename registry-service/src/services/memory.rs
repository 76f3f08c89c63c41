//! Process-local store with the same semantics as the MongoDB backend.
//!
//! Records keep insertion order, which stands in for natural store order.

use crate::models::{Client, EnrollmentSet, Program};
use crate::services::store::{ClientStore, ProgramStore, RegistryStore};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct InMemoryStore {
    programs: Mutex<Vec<Program>>,
    clients: Mutex<Vec<Client>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn programs(&self) -> Result<MutexGuard<'_, Vec<Program>>, AppError> {
        self.programs
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Program store poisoned: {}", e)))
    }

    fn clients(&self) -> Result<MutexGuard<'_, Vec<Client>>, AppError> {
        self.clients
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Client store poisoned: {}", e)))
    }
}

#[async_trait]
impl ProgramStore for InMemoryStore {
    async fn insert_program(&self, program: &Program) -> Result<(), AppError> {
        let mut programs = self.programs()?;
        if programs.iter().any(|p| p.id == program.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Duplicate key: program {}",
                program.id
            )));
        }
        programs.push(program.clone());
        Ok(())
    }

    async fn find_program(&self, id: &ObjectId) -> Result<Option<Program>, AppError> {
        Ok(self.programs()?.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, AppError> {
        Ok(self.programs()?.iter().find(|p| p.name == name).cloned())
    }

    async fn list_programs(&self) -> Result<Vec<Program>, AppError> {
        Ok(self.programs()?.clone())
    }

    async fn delete_program(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut programs = self.programs()?;
        let before = programs.len();
        programs.retain(|p| &p.id != id);
        Ok(programs.len() < before)
    }
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn insert_client(&self, client: &Client) -> Result<(), AppError> {
        let mut clients = self.clients()?;
        if clients.iter().any(|c| c.id == client.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Duplicate key: client {}",
                client.id
            )));
        }
        clients.push(client.clone());
        Ok(())
    }

    async fn find_client(&self, id: &ObjectId) -> Result<Option<Client>, AppError> {
        Ok(self.clients()?.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        Ok(self.clients()?.iter().find(|c| c.email == email).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.clients()?.clone())
    }

    async fn set_enrolled_programs(
        &self,
        client_id: &ObjectId,
        programs: &EnrollmentSet,
    ) -> Result<(), AppError> {
        // Matching no document is not an error, as with `update_one`
        if let Some(client) = self.clients()?.iter_mut().find(|c| &c.id == client_id) {
            client.enrolled_programs = programs.clone();
        }
        Ok(())
    }

    async fn add_enrolled_program(
        &self,
        client_id: &ObjectId,
        program_id: &ObjectId,
    ) -> Result<(), AppError> {
        if let Some(client) = self.clients()?.iter_mut().find(|c| &c.id == client_id) {
            client.enrolled_programs.insert(*program_id);
        }
        Ok(())
    }

    async fn remove_program_from_all_clients(
        &self,
        program_id: &ObjectId,
    ) -> Result<u64, AppError> {
        let mut modified = 0;
        for client in self.clients()?.iter_mut() {
            if client.enrolled_programs.remove(program_id) {
                modified += 1;
            }
        }
        Ok(modified)
    }
}

#[async_trait]
impl RegistryStore for InMemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        drop(self.programs()?);
        drop(self.clients()?);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_check_releases_both_locks() {
        let store = InMemoryStore::new();
        assert!(store.health_check().await.is_ok());

        // Both guards are gone, so writes still go through
        let program = Program::new("Cardiac Care".into(), None);
        store.insert_program(&program).await.unwrap();
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn delete_reports_missing_program() {
        let store = InMemoryStore::new();
        assert!(!store.delete_program(&ObjectId::new()).await.unwrap());

        let program = Program::new("Cardiac Care".into(), None);
        store.insert_program(&program).await.unwrap();
        assert!(store.delete_program(&program.id).await.unwrap());
        assert!(store.find_program(&program.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = InMemoryStore::new();
        let first = Program::new("Weight Loss".into(), None);
        let second = Program::new("Weight Loss".into(), Some("duplicate name".into()));
        store.insert_program(&first).await.unwrap();
        store.insert_program(&second).await.unwrap();

        let ids: Vec<_> = store
            .list_programs()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn pull_counts_only_clients_holding_the_program() {
        let store = InMemoryStore::new();
        let program_id = ObjectId::new();

        let mut holder = Client::new("A".into(), "B".into(), "a@b.com".into());
        holder.enrolled_programs.insert(program_id);
        let bystander = Client::new("C".into(), "D".into(), "c@d.com".into());
        store.insert_client(&holder).await.unwrap();
        store.insert_client(&bystander).await.unwrap();

        assert_eq!(store.remove_program_from_all_clients(&program_id).await.unwrap(), 1);
        let reloaded = store.find_client(&holder.id).await.unwrap().unwrap();
        assert!(reloaded.enrolled_programs.is_empty());
    }
}
