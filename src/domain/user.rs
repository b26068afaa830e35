use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DepartmentId, Role, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<DepartmentId>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

/// Payload sent to the backend when creating a user account.
#[derive(Clone, Debug, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<DepartmentId>,
}

impl NewUser {
    #[must_use]
    pub fn new(name: String, email: String, role: Role) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role,
            department_id: None,
        }
    }
}

/// Payload sent to the backend when editing a user account.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateUser {
    pub name: String,
    pub role: Role,
    pub department_id: Option<DepartmentId>,
    pub active: bool,
}
