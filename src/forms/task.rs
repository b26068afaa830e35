use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::{
    RequirementId, SprintId, TaskStatus, TimelineId, TypeConstraintError, UserId,
};

/// Create/edit form for a timeline task.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct TaskForm {
    pub timeline_id: i64,
    pub sprint_id: Option<i64>,
    pub requirement_id: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub status: i64,
    pub assignee_id: Option<i64>,
    pub starts_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    #[validate(range(max = 100))]
    pub progress: u8,
}

impl TryFrom<TaskForm> for NewTask {
    type Error = TypeConstraintError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        let mut payload = NewTask::new(TimelineId::new(form.timeline_id)?, form.title);
        payload.sprint_id = form.sprint_id.map(SprintId::new).transpose()?;
        payload.requirement_id = form.requirement_id.map(RequirementId::new).transpose()?;
        payload.assignee_id = form.assignee_id.map(UserId::new).transpose()?;
        payload.starts_on = form.starts_on;
        payload.due_on = form.due_on;
        Ok(payload)
    }
}

impl TryFrom<TaskForm> for UpdateTask {
    type Error = TypeConstraintError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        Ok(Self {
            sprint_id: form.sprint_id.map(SprintId::new).transpose()?,
            title: form.title.trim().to_string(),
            status: TaskStatus::try_from(form.status)?,
            assignee_id: form.assignee_id.map(UserId::new).transpose()?,
            starts_on: form.starts_on,
            due_on: form.due_on,
            progress: form.progress,
        })
    }
}

/// Drag/move payload from the Gantt view: a new lane and date span for an
/// existing task, everything else carried over unchanged.
#[derive(Clone, Debug, Deserialize)]
pub struct MoveTaskForm {
    pub sprint_id: Option<i64>,
    pub starts_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
}

impl MoveTaskForm {
    /// Builds the update payload by rebasing `task` onto the new placement.
    pub fn into_update(self, task: &Task) -> Result<UpdateTask, TypeConstraintError> {
        Ok(UpdateTask {
            sprint_id: self.sprint_id.map(SprintId::new).transpose()?,
            title: task.title.clone(),
            status: task.status,
            assignee_id: task.assignee_id,
            starts_on: self.starts_on,
            due_on: self.due_on,
            progress: task.progress,
        })
    }
}
