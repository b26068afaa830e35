//! URL-parameter deep links for list pages.
//!
//! Pages that opt into deep linking thread their list state through the URL
//! query string so navigation and shared links land on the same view. The
//! parameter structs here are the URL contract of each page; values are raw
//! backend codes, validated only when applied to a controller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::ListController;
use crate::query::FilterValue;

#[derive(Debug, Error)]
pub enum DeepLinkError {
    #[error("malformed query string: {0}")]
    Parse(String),
    #[error("unencodable parameters: {0}")]
    Print(String),
}

/// Decodes a URL query string (a leading `?` is tolerated).
pub fn parse<T: DeserializeOwned>(query: &str) -> Result<T, DeepLinkError> {
    serde_html_form::from_str(query.trim_start_matches('?'))
        .map_err(|e| DeepLinkError::Parse(e.to_string()))
}

/// Encodes parameters back into a URL query string.
pub fn print<T: Serialize>(params: &T) -> Result<String, DeepLinkError> {
    serde_html_form::to_string(params).map_err(|e| DeepLinkError::Print(e.to_string()))
}

/// List-state portion of a page's URL contract.
pub trait ListParams {
    fn page(&self) -> Option<usize>;
    fn page_size(&self) -> Option<usize>;
    fn search(&self) -> Option<&str>;
    /// Filter assignments in schema terms; `None` values are skipped.
    fn filter_entries(&self) -> Vec<(&'static str, Option<FilterValue>)>;
}

/// Applies deep-linked parameters to a controller as one commit: the
/// intermediate states are never issued, only the final key fetches.
pub fn apply<T, P>(list: &ListController<T>, params: &P)
where
    T: Clone + Send + Sync + 'static,
    P: ListParams,
{
    list.restore(|query, sizes| {
        if let Some(size) = params.page_size() {
            query.set_page_size(sizes, size);
        }
        for (name, value) in params.filter_entries() {
            if value.is_some() {
                query.set_filter(name, value);
            }
        }
        if let Some(q) = params.search() {
            query.set_search(q);
        }
        // Page last: every other mutation resets it. The server clamps
        // overflowing pages, so no local clamp against unknown totals.
        if let Some(page) = params.page() {
            query.adopt_page(page);
        }
    });
}

macro_rules! common_list_params {
    () => {
        fn page(&self) -> Option<usize> {
            self.page
        }

        fn page_size(&self) -> Option<usize> {
            self.per_page
        }

        fn search(&self) -> Option<&str> {
            self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
    };
}

/// URL contract of the projects page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

impl ListParams for ProjectListParams {
    common_list_params!();

    fn filter_entries(&self) -> Vec<(&'static str, Option<FilterValue>)> {
        vec![
            ("status", self.status.map(Into::into)),
            ("department_id", self.department_id.map(Into::into)),
            ("owner_id", self.owner_id.map(Into::into)),
        ]
    }
}

/// URL contract of the requirements and approval pages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    /// Entity to highlight after the list renders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_id: Option<i64>,
    /// Row anchor to scroll to, paired with `highlight_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<String>,
}

impl RequirementListParams {
    /// Row anchor the highlight aid should target, when the link carries one.
    /// An explicit `scroll_to` wins; otherwise the anchor is derived from
    /// `highlight_id` the way the pages name their rows.
    pub fn scroll_anchor(&self) -> Option<String> {
        self.scroll_to
            .clone()
            .or_else(|| self.highlight_id.map(|id| format!("requirement-{id}")))
    }
}

impl ListParams for RequirementListParams {
    common_list_params!();

    fn filter_entries(&self) -> Vec<(&'static str, Option<FilterValue>)> {
        vec![
            ("status", self.status.map(Into::into)),
            ("priority", self.priority.map(Into::into)),
            ("project_id", self.project_id.map(Into::into)),
            ("department_id", self.department_id.map(Into::into)),
        ]
    }
}

/// URL contract of the timeline page, including the sprint/task
/// auto-selection ids the Gantt view consumes on arrival.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    /// Timeline to open when the page has several to choose from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_id: Option<i64>,
    /// Task to select once the timeline tree is built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
}

impl ListParams for TimelineParams {
    common_list_params!();

    fn filter_entries(&self) -> Vec<(&'static str, Option<FilterValue>)> {
        vec![
            ("status", self.status.map(Into::into)),
            ("sprint_id", self.sprint_id.map(Into::into)),
            ("assignee_id", self.assignee_id.map(Into::into)),
        ]
    }
}

/// URL contract of the users page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
}

impl ListParams for UserListParams {
    common_list_params!();

    fn filter_entries(&self) -> Vec<(&'static str, Option<FilterValue>)> {
        vec![
            ("role", self.role.map(Into::into)),
            ("department_id", self.department_id.map(Into::into)),
        ]
    }
}

/// URL contract of the department members page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
}

impl ListParams for MemberListParams {
    common_list_params!();

    fn filter_entries(&self) -> Vec<(&'static str, Option<FilterValue>)> {
        vec![("department_id", self.department_id.map(Into::into))]
    }
}
