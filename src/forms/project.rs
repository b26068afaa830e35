use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{NewProject, UpdateProject};
use crate::domain::types::{DepartmentId, ProjectStatus, TypeConstraintError, UserId};

/// Create/edit form for a project, as submitted by the modal dialog.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 16))]
    pub code: Option<String>,
    pub status: i64,
    pub owner_id: Option<i64>,
    pub department_id: Option<i64>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

impl TryFrom<ProjectForm> for NewProject {
    type Error = TypeConstraintError;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        let mut payload = NewProject::new(form.name, form.code);
        payload.status = ProjectStatus::try_from(form.status)?;
        payload.owner_id = form.owner_id.map(UserId::new).transpose()?;
        payload.department_id = form.department_id.map(DepartmentId::new).transpose()?;
        payload.starts_on = form.starts_on;
        payload.ends_on = form.ends_on;
        Ok(payload)
    }
}

impl TryFrom<ProjectForm> for UpdateProject {
    type Error = TypeConstraintError;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.trim().to_string(),
            code: form
                .code
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            status: ProjectStatus::try_from(form.status)?,
            owner_id: form.owner_id.map(UserId::new).transpose()?,
            starts_on: form.starts_on,
            ends_on: form.ends_on,
        })
    }
}
