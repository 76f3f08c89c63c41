use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The programs a client is enrolled in.
///
/// Stored and sent as an array of hex ids. Duplicates collapse when the array
/// is read back, and entries that are not valid ObjectIds are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EnrollmentSet(BTreeSet<ObjectId>);

impl EnrollmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, program_id: &ObjectId) -> bool {
        self.0.contains(program_id)
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, program_id: ObjectId) -> bool {
        self.0.insert(program_id)
    }

    pub fn remove(&mut self, program_id: &ObjectId) -> bool {
        self.0.remove(program_id)
    }

    pub fn union<'a>(&self, program_ids: impl IntoIterator<Item = &'a ObjectId>) -> Self {
        let mut merged = self.0.clone();
        merged.extend(program_ids.into_iter().copied());
        Self(merged)
    }

    pub fn difference<'a>(&self, program_ids: impl IntoIterator<Item = &'a ObjectId>) -> Self {
        let mut remaining = self.0.clone();
        for id in program_ids {
            remaining.remove(id);
        }
        Self(remaining)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex_vec(&self) -> Vec<String> {
        self.0.iter().map(|id| id.to_hex()).collect()
    }
}

impl From<Vec<String>> for EnrollmentSet {
    fn from(values: Vec<String>) -> Self {
        Self(
            values
                .iter()
                .filter_map(|value| ObjectId::parse_str(value).ok())
                .collect(),
        )
    }
}

impl From<EnrollmentSet> for Vec<String> {
    fn from(set: EnrollmentSet) -> Self {
        set.to_hex_vec()
    }
}

impl FromIterator<ObjectId> for EnrollmentSet {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
