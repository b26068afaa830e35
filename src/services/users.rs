//! Users & roles page service.

use std::sync::Arc;

use validator::Validate;

use crate::controller::{ListConfig, ListController};
use crate::deeplink::{self, UserListParams};
use crate::domain::types::{DepartmentId, Role, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::fetch::{ResourceFetcher, ResourceWriter};
use crate::forms::user::UserForm;
use crate::query::{FilterKind, FilterSchema, FilterSpec};
use crate::services::ServiceResult;

/// Filters the users list recognizes.
pub const FILTERS: FilterSchema = FilterSchema::new(&[
    FilterSpec::new("role", FilterKind::Int),
    FilterSpec::new("department_id", FilterKind::Int),
]);

/// The users table defaults to the denser page size.
pub fn default_config() -> ListConfig {
    ListConfig::with_default_page_size(20)
}

pub type UserWriter = dyn ResourceWriter<NewUser, UpdateUser>;

pub struct UsersService {
    list: ListController<User>,
    writer: Arc<UserWriter>,
}

impl UsersService {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher<User>>,
        writer: Arc<UserWriter>,
        config: ListConfig,
    ) -> Self {
        Self {
            list: ListController::new(fetcher, FILTERS, config),
            writer,
        }
    }

    pub fn list(&self) -> &ListController<User> {
        &self.list
    }

    pub fn filter_role(&self, role: Option<Role>) {
        let _ = self.list.set_filter("role", role.map(|r| r.code().into()));
    }

    pub fn filter_department(&self, department: Option<DepartmentId>) {
        let _ = self
            .list
            .set_filter("department_id", department.map(|id| id.get().into()));
    }

    pub fn apply_params(&self, params: &UserListParams) {
        deeplink::apply(&self.list, params);
    }

    pub async fn create(&self, form: UserForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = NewUser::try_from(form)?;
        self.writer.create(&payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn update(&self, id: UserId, form: UserForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = UpdateUser::try_from(form)?;
        self.writer.update(id.get(), &payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn delete(&self, id: UserId) -> ServiceResult<()> {
        self.writer.delete(id.get()).await?;
        self.list.refresh();
        Ok(())
    }
}
