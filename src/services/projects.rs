//! Projects page service.

use std::sync::Arc;

use validator::Validate;

use crate::controller::{ListConfig, ListController};
use crate::deeplink::{self, ProjectListParams};
use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::types::{DepartmentId, ProjectId, ProjectStatus, UserId};
use crate::fetch::{ResourceFetcher, ResourceWriter};
use crate::forms::project::ProjectForm;
use crate::query::{FilterKind, FilterSchema, FilterSpec};
use crate::services::ServiceResult;

/// Filters the projects list recognizes.
pub const FILTERS: FilterSchema = FilterSchema::new(&[
    FilterSpec::new("status", FilterKind::Int),
    FilterSpec::new("department_id", FilterKind::Int),
    FilterSpec::new("owner_id", FilterKind::Int),
]);

pub type ProjectWriter = dyn ResourceWriter<NewProject, UpdateProject>;

pub struct ProjectsService {
    list: ListController<Project>,
    writer: Arc<ProjectWriter>,
}

impl ProjectsService {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher<Project>>,
        writer: Arc<ProjectWriter>,
        config: ListConfig,
    ) -> Self {
        Self {
            list: ListController::new(fetcher, FILTERS, config),
            writer,
        }
    }

    pub fn list(&self) -> &ListController<Project> {
        &self.list
    }

    pub fn filter_status(&self, status: Option<ProjectStatus>) {
        let _ = self
            .list
            .set_filter("status", status.map(|s| s.code().into()));
    }

    pub fn filter_department(&self, department: Option<DepartmentId>) {
        let _ = self
            .list
            .set_filter("department_id", department.map(|id| id.get().into()));
    }

    pub fn filter_owner(&self, owner: Option<UserId>) {
        let _ = self
            .list
            .set_filter("owner_id", owner.map(|id| id.get().into()));
    }

    pub fn apply_params(&self, params: &ProjectListParams) {
        deeplink::apply(&self.list, params);
    }

    pub async fn create(&self, form: ProjectForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = NewProject::try_from(form)?;
        self.writer.create(&payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn update(&self, id: ProjectId, form: ProjectForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = UpdateProject::try_from(form)?;
        self.writer.update(id.get(), &payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn delete(&self, id: ProjectId) -> ServiceResult<()> {
        self.writer.delete(id.get()).await?;
        self.list.refresh();
        Ok(())
    }
}
