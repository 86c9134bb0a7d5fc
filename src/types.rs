/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Write operations, used to pick request encoding and validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
}

/// The two record collections the dashboard manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Organization,
    Person,
}

impl RecordKind {
    /// Path segment of the backend collection
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Organization => "company",
            RecordKind::Person => "employee",
        }
    }

    /// Endpoint under the collection that returns every record
    pub fn list_action(&self) -> &'static str {
        match self {
            RecordKind::Organization => "get_all_companies",
            RecordKind::Person => "get_all_employees",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Organization => "organization",
            RecordKind::Person => "person",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Organization => "organizations",
            RecordKind::Person => "people",
        }
    }
}
