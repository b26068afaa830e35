use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DepartmentId, Priority, ProjectId, RequirementId, RequirementStatus, UserId,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    pub id: RequirementId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: RequirementStatus,
    pub priority: Priority,
    pub assignee_id: Option<UserId>,
    pub department_id: Option<DepartmentId>,
    /// Login of the reviewer who moved the requirement to its current
    /// workflow state, when the backend reports one.
    pub reviewed_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Requirement {
    /// Whether the requirement sits in a state the approval pages act on.
    pub fn awaiting_review(&self) -> bool {
        matches!(
            self.status,
            RequirementStatus::Submitted | RequirementStatus::UnderReview
        )
    }
}

/// Payload sent to the backend when creating a requirement.
#[derive(Clone, Debug, Serialize)]
pub struct NewRequirement {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub assignee_id: Option<UserId>,
    pub department_id: Option<DepartmentId>,
}

impl NewRequirement {
    #[must_use]
    pub fn new(project_id: ProjectId, title: String, description: Option<String>) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            priority: Priority::Medium,
            assignee_id: None,
            department_id: None,
        }
    }
}

/// Payload sent to the backend when editing a requirement.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateRequirement {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub assignee_id: Option<UserId>,
}
