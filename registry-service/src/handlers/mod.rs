pub mod clients;
pub mod health;
pub mod programs;

pub use clients::{enroll_client, get_client_profile, list_clients, register_client, unenroll_client};
pub use health::{health_check, metrics_endpoint, readiness_check, root};
pub use programs::{
    create_program, delete_program, enroll_client_in_program, get_program, list_programs,
};
