pub mod client;
pub mod enrollment;
pub mod program;

pub use client::Client;
pub use enrollment::EnrollmentSet;
pub use program::Program;
