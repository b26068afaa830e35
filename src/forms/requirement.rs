use serde::Deserialize;
use validator::Validate;

use crate::domain::requirement::{NewRequirement, UpdateRequirement};
use crate::domain::types::{
    DepartmentId, Priority, ProjectId, TypeConstraintError, UserId,
};

/// Create/edit form for a requirement.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct RequirementForm {
    pub project_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    pub priority: i64,
    pub assignee_id: Option<i64>,
    pub department_id: Option<i64>,
}

impl TryFrom<RequirementForm> for NewRequirement {
    type Error = TypeConstraintError;

    fn try_from(form: RequirementForm) -> Result<Self, Self::Error> {
        let mut payload = NewRequirement::new(
            ProjectId::new(form.project_id)?,
            form.title,
            form.description,
        );
        payload.priority = Priority::try_from(form.priority)?;
        payload.assignee_id = form.assignee_id.map(UserId::new).transpose()?;
        payload.department_id = form.department_id.map(DepartmentId::new).transpose()?;
        Ok(payload)
    }
}

impl TryFrom<RequirementForm> for UpdateRequirement {
    type Error = TypeConstraintError;

    fn try_from(form: RequirementForm) -> Result<Self, Self::Error> {
        Ok(Self {
            title: form.title.trim().to_string(),
            description: form
                .description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            priority: Priority::try_from(form.priority)?,
            assignee_id: form.assignee_id.map(UserId::new).transpose()?,
        })
    }
}
