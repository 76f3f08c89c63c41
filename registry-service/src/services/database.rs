use crate::models::{Client, EnrollmentSet, Program};
use crate::services::store::{ClientStore, ProgramStore, RegistryStore};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for registry-service");

        // Multikey index backing the cascade `$pull` on program deletion
        let enrolled_index = IndexModel::builder()
            .keys(doc! { "enrolled_programs": 1 })
            .options(
                IndexOptions::builder()
                    .name("enrolled_programs_lookup".to_string())
                    .build(),
            )
            .build();

        self.clients()
            .create_index(enrolled_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create enrolled_programs index on clients collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on clients.enrolled_programs");

        // Not unique: duplicates are allowed, the seeder only looks them up
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_lookup".to_string())
                    .build(),
            )
            .build();

        self.clients()
            .create_index(email_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create email index on clients collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on clients.email");

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name("name_lookup".to_string())
                    .build(),
            )
            .build();

        self.programs()
            .create_index(name_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create name index on programs collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on programs.name");

        Ok(())
    }

    pub fn programs(&self) -> Collection<Program> {
        self.db.collection("programs")
    }

    pub fn clients(&self) -> Collection<Client> {
        self.db.collection("clients")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl ProgramStore for MongoDb {
    async fn insert_program(&self, program: &Program) -> Result<(), AppError> {
        self.programs()
            .insert_one(program, None)
            .await
            .map_err(|e| {
                tracing::error!(program_id = %program.id, "Failed to insert program: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn find_program(&self, id: &ObjectId) -> Result<Option<Program>, AppError> {
        Ok(self.programs().find_one(doc! { "_id": *id }, None).await?)
    }

    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, AppError> {
        Ok(self.programs().find_one(doc! { "name": name }, None).await?)
    }

    async fn list_programs(&self) -> Result<Vec<Program>, AppError> {
        let cursor = self.programs().find(None, None).await?;
        let programs: Vec<Program> = cursor.try_collect().await?;
        Ok(programs)
    }

    async fn delete_program(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .programs()
            .delete_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(program_id = %id, "Failed to delete program: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ClientStore for MongoDb {
    async fn insert_client(&self, client: &Client) -> Result<(), AppError> {
        self.clients()
            .insert_one(client, None)
            .await
            .map_err(|e| {
                tracing::error!(client_id = %client.id, "Failed to insert client: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn find_client(&self, id: &ObjectId) -> Result<Option<Client>, AppError> {
        Ok(self.clients().find_one(doc! { "_id": *id }, None).await?)
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        Ok(self.clients().find_one(doc! { "email": email }, None).await?)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let cursor = self.clients().find(None, None).await?;
        let clients: Vec<Client> = cursor.try_collect().await?;
        Ok(clients)
    }

    async fn set_enrolled_programs(
        &self,
        client_id: &ObjectId,
        programs: &EnrollmentSet,
    ) -> Result<(), AppError> {
        self.clients()
            .update_one(
                doc! { "_id": *client_id },
                doc! { "$set": { "enrolled_programs": to_bson(programs)? } },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!(client_id = %client_id, "Failed to write enrollment set: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn add_enrolled_program(
        &self,
        client_id: &ObjectId,
        program_id: &ObjectId,
    ) -> Result<(), AppError> {
        self.clients()
            .update_one(
                doc! { "_id": *client_id },
                doc! { "$addToSet": { "enrolled_programs": program_id.to_hex() } },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    client_id = %client_id,
                    program_id = %program_id,
                    "Failed to add program to enrollment set: {}",
                    e
                );
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn remove_program_from_all_clients(
        &self,
        program_id: &ObjectId,
    ) -> Result<u64, AppError> {
        let hex = program_id.to_hex();
        let result = self
            .clients()
            .update_many(
                doc! { "enrolled_programs": hex.as_str() },
                doc! { "$pull": { "enrolled_programs": hex.as_str() } },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!(program_id = %program_id, "Failed to pull program from clients: {}", e);
                AppError::from(e)
            })?;
        Ok(result.modified_count)
    }
}

#[async_trait]
impl RegistryStore for MongoDb {
    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
