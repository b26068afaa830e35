use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{RequirementId, SprintId, TaskId, TaskStatus, TimelineId, UserId};

/// A unit of work placed on a timeline's sprint lane.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub timeline_id: TimelineId,
    pub sprint_id: Option<SprintId>,
    pub requirement_id: Option<RequirementId>,
    pub title: String,
    pub status: TaskStatus,
    pub assignee_id: Option<UserId>,
    pub starts_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    /// Completion percentage reported by the backend, 0..=100.
    pub progress: u8,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A sprint lane as rendered on the timeline page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sprint {
    pub id: SprintId,
    pub timeline_id: TimelineId,
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

/// Payload sent to the backend when creating a task.
#[derive(Clone, Debug, Serialize)]
pub struct NewTask {
    pub timeline_id: TimelineId,
    pub sprint_id: Option<SprintId>,
    pub requirement_id: Option<RequirementId>,
    pub title: String,
    pub assignee_id: Option<UserId>,
    pub starts_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
}

impl NewTask {
    #[must_use]
    pub fn new(timeline_id: TimelineId, title: String) -> Self {
        Self {
            timeline_id,
            sprint_id: None,
            requirement_id: None,
            title: title.trim().to_string(),
            assignee_id: None,
            starts_on: None,
            due_on: None,
        }
    }
}

/// Payload sent to the backend when editing or moving a task.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateTask {
    pub sprint_id: Option<SprintId>,
    pub title: String,
    pub status: TaskStatus,
    pub assignee_id: Option<UserId>,
    pub starts_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub progress: u8,
}
