use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DepartmentId, MemberId, UserId};

/// A user's membership record inside one department.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    pub department_id: DepartmentId,
    /// Free-form position label shown on the members page.
    pub position: Option<String>,
    pub joined_on: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Payload sent to the backend when adding a member to a department.
#[derive(Clone, Debug, Serialize)]
pub struct NewMember {
    pub user_id: UserId,
    pub department_id: DepartmentId,
    pub position: Option<String>,
    pub joined_on: Option<NaiveDate>,
}

impl NewMember {
    #[must_use]
    pub fn new(user_id: UserId, department_id: DepartmentId) -> Self {
        Self {
            user_id,
            department_id,
            position: None,
            joined_on: None,
        }
    }
}

/// Payload sent to the backend when editing a membership record.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateMember {
    pub position: Option<String>,
    pub joined_on: Option<NaiveDate>,
}
