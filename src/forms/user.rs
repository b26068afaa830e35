use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::member::{NewMember, UpdateMember};
use crate::domain::types::{DepartmentId, Role, TypeConstraintError, UserId};
use crate::domain::user::{NewUser, UpdateUser};

/// Create/edit form for a user account.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: i64,
    pub department_id: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<UserForm> for NewUser {
    type Error = TypeConstraintError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        let mut payload = NewUser::new(form.name, form.email, Role::try_from(form.role)?);
        payload.department_id = form.department_id.map(DepartmentId::new).transpose()?;
        Ok(payload)
    }
}

impl TryFrom<UserForm> for UpdateUser {
    type Error = TypeConstraintError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.trim().to_string(),
            role: Role::try_from(form.role)?,
            department_id: form.department_id.map(DepartmentId::new).transpose()?,
            active: form.active,
        })
    }
}

/// Add/edit form for a department membership.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct MemberForm {
    pub user_id: i64,
    pub department_id: i64,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    pub joined_on: Option<NaiveDate>,
}

impl TryFrom<MemberForm> for NewMember {
    type Error = TypeConstraintError;

    fn try_from(form: MemberForm) -> Result<Self, Self::Error> {
        let mut payload = NewMember::new(
            UserId::new(form.user_id)?,
            DepartmentId::new(form.department_id)?,
        );
        payload.position = form.position.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        payload.joined_on = form.joined_on;
        Ok(payload)
    }
}

impl From<MemberForm> for UpdateMember {
    fn from(form: MemberForm) -> Self {
        Self {
            position: form
                .position
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            joined_on: form.joined_on,
        }
    }
}
