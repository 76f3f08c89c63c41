//! Sample data for local environments. Programs are matched by name and
//! clients by email, so repeated runs insert nothing new.

use crate::models::{Client, EnrollmentSet, Program};
use crate::services::RegistryStore;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::collections::HashMap;

const SAMPLE_PROGRAMS: &[(&str, &str)] = &[
    ("Diabetes Management", "Program for managing diabetes"),
    ("Cardiac Care", "Program for heart health"),
    ("Weight Loss", "Program for weight management"),
];

struct SampleClient {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    programs: &'static [&'static str],
}

const SAMPLE_CLIENTS: &[SampleClient] = &[
    SampleClient {
        first_name: "James",
        last_name: "Omondi",
        email: "james.omondi@example.com",
        programs: &["Diabetes Management", "Cardiac Care"],
    },
    SampleClient {
        first_name: "Mary",
        last_name: "Wanjiku",
        email: "mary.wanjiku@example.com",
        programs: &["Weight Loss"],
    },
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub programs_inserted: usize,
    pub programs_existing: usize,
    pub clients_inserted: usize,
    pub clients_existing: usize,
}

pub async fn seed_sample_data(store: &dyn RegistryStore) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();
    let mut program_ids: HashMap<&str, ObjectId> = HashMap::new();

    for (name, description) in SAMPLE_PROGRAMS {
        let id = match store.find_program_by_name(name).await? {
            Some(existing) => {
                tracing::info!(program = %name, program_id = %existing.id, "Program already exists");
                report.programs_existing += 1;
                existing.id
            }
            None => {
                let program = Program::new(name.to_string(), Some(description.to_string()));
                store.insert_program(&program).await?;
                tracing::info!(program = %name, program_id = %program.id, "Inserted program");
                report.programs_inserted += 1;
                program.id
            }
        };
        program_ids.insert(*name, id);
    }

    for sample in SAMPLE_CLIENTS {
        if store.find_client_by_email(sample.email).await?.is_some() {
            tracing::info!(email = %sample.email, "Client already exists");
            report.clients_existing += 1;
            continue;
        }

        let mut client = Client::new(
            sample.first_name.to_string(),
            sample.last_name.to_string(),
            sample.email.to_string(),
        );
        client.enrolled_programs = sample
            .programs
            .iter()
            .filter_map(|name| program_ids.get(name).copied())
            .collect::<EnrollmentSet>();

        store.insert_client(&client).await?;
        tracing::info!(
            email = %sample.email,
            enrolled = ?client.enrolled_programs.to_hex_vec(),
            "Inserted client"
        );
        report.clients_inserted += 1;
    }

    Ok(report)
}
