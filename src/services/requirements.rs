//! Requirements page service; the approval queue views share it, filtered
//! on workflow status.

use std::sync::Arc;

use validator::Validate;

use crate::controller::{ListConfig, ListController};
use crate::deeplink::{self, RequirementListParams};
use crate::domain::requirement::{NewRequirement, Requirement, UpdateRequirement};
use crate::domain::types::{
    DepartmentId, Priority, ProjectId, RequirementId, RequirementStatus,
};
use crate::fetch::{ResourceFetcher, ResourceWriter};
use crate::forms::requirement::RequirementForm;
use crate::highlight::Highlighter;
use crate::query::{FilterKind, FilterSchema, FilterSpec};
use crate::services::ServiceResult;

/// Filters the requirements list recognizes.
pub const FILTERS: FilterSchema = FilterSchema::new(&[
    FilterSpec::new("status", FilterKind::Int),
    FilterSpec::new("priority", FilterKind::Int),
    FilterSpec::new("project_id", FilterKind::Int),
    FilterSpec::new("department_id", FilterKind::Int),
]);

pub type RequirementWriter = dyn ResourceWriter<NewRequirement, UpdateRequirement>;

pub struct RequirementsService {
    list: ListController<Requirement>,
    writer: Arc<RequirementWriter>,
}

impl RequirementsService {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher<Requirement>>,
        writer: Arc<RequirementWriter>,
        config: ListConfig,
    ) -> Self {
        Self {
            list: ListController::new(fetcher, FILTERS, config),
            writer,
        }
    }

    pub fn list(&self) -> &ListController<Requirement> {
        &self.list
    }

    // Typed setters below pass names and kinds straight from FILTERS, so
    // the schema check cannot reject them.

    pub fn filter_status(&self, status: Option<RequirementStatus>) {
        let _ = self
            .list
            .set_filter("status", status.map(|s| s.code().into()));
    }

    pub fn filter_priority(&self, priority: Option<Priority>) {
        let _ = self
            .list
            .set_filter("priority", priority.map(|p| p.code().into()));
    }

    pub fn filter_project(&self, project: Option<ProjectId>) {
        let _ = self
            .list
            .set_filter("project_id", project.map(|id| id.get().into()));
    }

    pub fn filter_department(&self, department: Option<DepartmentId>) {
        let _ = self
            .list
            .set_filter("department_id", department.map(|id| id.get().into()));
    }

    /// Applies a deep link: list state in one commit, then the highlight
    /// aid if the link targets a row and the page wired one up.
    pub fn apply_params(
        &self,
        params: &RequirementListParams,
        highlighter: Option<&Highlighter>,
    ) {
        deeplink::apply(&self.list, params);
        if let (Some(aid), Some(anchor)) = (highlighter, params.scroll_anchor()) {
            aid.engage(&anchor);
        }
    }

    /// Renders the current list state as a shareable query string.
    pub fn deep_link(&self, highlight: Option<RequirementId>) -> ServiceResult<String> {
        let snapshot = self.list.snapshot();
        let params = RequirementListParams {
            page: Some(snapshot.page).filter(|p| *p > 1),
            per_page: Some(snapshot.page_size)
                .filter(|s| *s != self.list.config().page_sizes.default_size()),
            q: Some(snapshot.search_input.trim().to_string()).filter(|q| !q.is_empty()),
            status: snapshot.filters.get("status").and_then(|v| v.as_int()),
            priority: snapshot.filters.get("priority").and_then(|v| v.as_int()),
            project_id: snapshot.filters.get("project_id").and_then(|v| v.as_int()),
            department_id: snapshot
                .filters
                .get("department_id")
                .and_then(|v| v.as_int()),
            highlight_id: highlight.map(RequirementId::get),
            scroll_to: None,
        };
        Ok(deeplink::print(&params)?)
    }

    pub async fn create(&self, form: RequirementForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = NewRequirement::try_from(form)?;
        self.writer.create(&payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn update(&self, id: RequirementId, form: RequirementForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = UpdateRequirement::try_from(form)?;
        self.writer.update(id.get(), &payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn delete(&self, id: RequirementId) -> ServiceResult<()> {
        self.writer.delete(id.get()).await?;
        self.list.refresh();
        Ok(())
    }
}
