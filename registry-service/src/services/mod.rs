pub mod database;
pub mod enrollment;
pub mod memory;
pub mod metrics;
pub mod profile;
pub mod seed;
pub mod store;

pub use database::MongoDb;
pub use enrollment::EnrollmentCoordinator;
pub use memory::InMemoryStore;
pub use metrics::{get_metrics, init_metrics};
pub use profile::ProfileAssembler;
pub use seed::{seed_sample_data, SeedReport};
pub use store::{ClientStore, ProgramStore, RegistryStore};
