//! Timeline page service: the task list behind the Gantt view.

use std::sync::Arc;

use validator::Validate;

use crate::controller::{ListConfig, ListController};
use crate::deeplink::{self, TimelineParams};
use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::{SprintId, TaskId, TaskStatus, TimelineId, UserId};
use crate::fetch::{ResourceFetcher, ResourceWriter};
use crate::forms::task::{MoveTaskForm, TaskForm};
use crate::query::{FilterKind, FilterSchema, FilterSpec};
use crate::services::ServiceResult;

/// Filters the timeline task list recognizes.
pub const FILTERS: FilterSchema = FilterSchema::new(&[
    FilterSpec::new("status", FilterKind::Int),
    FilterSpec::new("sprint_id", FilterKind::Int),
    FilterSpec::new("assignee_id", FilterKind::Int),
]);

pub type TaskWriter = dyn ResourceWriter<NewTask, UpdateTask>;

/// Entities the timeline auto-selects when a deep link names them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimelineSelection {
    pub timeline: Option<TimelineId>,
    pub sprint: Option<SprintId>,
    pub task: Option<TaskId>,
}

pub struct TasksService {
    list: ListController<Task>,
    writer: Arc<TaskWriter>,
}

impl TasksService {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher<Task>>,
        writer: Arc<TaskWriter>,
        config: ListConfig,
    ) -> Self {
        Self {
            list: ListController::new(fetcher, FILTERS, config),
            writer,
        }
    }

    pub fn list(&self) -> &ListController<Task> {
        &self.list
    }

    pub fn filter_status(&self, status: Option<TaskStatus>) {
        let _ = self
            .list
            .set_filter("status", status.map(|s| s.code().into()));
    }

    pub fn filter_sprint(&self, sprint: Option<SprintId>) {
        let _ = self
            .list
            .set_filter("sprint_id", sprint.map(|id| id.get().into()));
    }

    pub fn filter_assignee(&self, assignee: Option<UserId>) {
        let _ = self
            .list
            .set_filter("assignee_id", assignee.map(|id| id.get().into()));
    }

    pub fn apply_params(&self, params: &TimelineParams) {
        deeplink::apply(&self.list, params);
    }

    /// Resolves the auto-selection ids a deep link carries. Non-positive
    /// ids in the URL are treated as absent rather than errors.
    pub fn selection(params: &TimelineParams) -> TimelineSelection {
        TimelineSelection {
            timeline: params.timeline_id.and_then(|id| TimelineId::new(id).ok()),
            sprint: params.sprint_id.and_then(|id| SprintId::new(id).ok()),
            task: params.task_id.and_then(|id| TaskId::new(id).ok()),
        }
    }

    pub async fn create(&self, form: TaskForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = NewTask::try_from(form)?;
        self.writer.create(&payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn update(&self, id: TaskId, form: TaskForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = UpdateTask::try_from(form)?;
        self.writer.update(id.get(), &payload).await?;
        self.list.refresh();
        Ok(())
    }

    /// Drag/move from the Gantt view: rebases the task onto a new lane and
    /// date span, everything else carried over.
    pub async fn move_task(&self, task: &Task, form: MoveTaskForm) -> ServiceResult<()> {
        let payload = form.into_update(task)?;
        self.writer.update(task.id.get(), &payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn delete(&self, id: TaskId) -> ServiceResult<()> {
        self.writer.delete(id.get()).await?;
        self.list.refresh();
        Ok(())
    }
}
