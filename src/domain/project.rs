use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DepartmentId, ProjectId, ProjectStatus, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Short code shown in tables and deep links, e.g. "PRJ-104".
    pub code: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: Option<UserId>,
    pub department_id: Option<DepartmentId>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload sent to the backend when creating a project.
#[derive(Clone, Debug, Serialize)]
pub struct NewProject {
    pub name: String,
    pub code: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: Option<UserId>,
    pub department_id: Option<DepartmentId>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

impl NewProject {
    #[must_use]
    pub fn new(name: String, code: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            code: code
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            status: ProjectStatus::Planning,
            owner_id: None,
            department_id: None,
            starts_on: None,
            ends_on: None,
        }
    }
}

/// Payload sent to the backend when editing a project.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateProject {
    pub name: String,
    pub code: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: Option<UserId>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}
