//! Service-layer behavior: validation gating, mutation-then-refresh, and
//! deep-link rendering.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use pmboard::controller::ListConfig;
use pmboard::domain::requirement::Requirement;
use pmboard::domain::types::{RequirementId, RequirementStatus};
use pmboard::fetch::errors::FetchResult;
use pmboard::fetch::{FetchParams, ResourceFetcher, ResultPage};
use pmboard::forms::requirement::RequirementForm;
use pmboard::services::ServiceError;
use pmboard::services::requirements::RequirementsService;

mod common;
use common::{RecordingWriter, settle};

/// Serves empty pages and counts list fetches.
#[derive(Clone, Default)]
struct CountingFetcher {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ResourceFetcher<Requirement> for CountingFetcher {
    async fn fetch(&self, params: &FetchParams) -> FetchResult<ResultPage<Requirement>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResultPage {
            items: Vec::new(),
            total: 0,
            total_pages: 1,
            page: params.page,
        })
    }
}

fn form(title: &str) -> RequirementForm {
    RequirementForm {
        project_id: 1,
        title: title.to_string(),
        description: None,
        priority: 1,
        assignee_id: None,
        department_id: None,
    }
}

fn service() -> (RequirementsService, CountingFetcher, RecordingWriter) {
    let fetcher = CountingFetcher::default();
    let writer = RecordingWriter::new();
    let service = RequirementsService::new(
        Arc::new(fetcher.clone()),
        Arc::new(writer.clone()),
        ListConfig::default(),
    );
    (service, fetcher, writer)
}

#[tokio::test(start_paused = true)]
async fn create_refreshes_the_list_after_the_write() {
    let (service, fetcher, writer) = service();
    settle().await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

    service.create(form("Support SSO login")).await.unwrap();
    settle().await;

    assert_eq!(writer.calls(), vec!["create"]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn invalid_forms_never_reach_the_writer() {
    let (service, fetcher, writer) = service();
    settle().await;

    let result = service.create(form("")).await;
    settle().await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert!(writer.calls().is_empty());
    // List state untouched: no refresh happened.
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_codes_are_constraint_errors() {
    let (service, _fetcher, writer) = service();
    settle().await;

    let mut bad = form("Valid title");
    bad.priority = 99;
    let result = service.create(bad).await;

    assert!(matches!(result, Err(ServiceError::Constraint(_))));
    assert!(writer.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_deletes_surface_and_skip_the_refresh() {
    let (service, fetcher, writer) = service();
    settle().await;

    writer.fail_all();
    let result = service.delete(RequirementId::new(7).unwrap()).await;
    settle().await;

    assert!(matches!(result, Err(ServiceError::Fetch(_))));
    assert_eq!(writer.calls(), vec!["delete:7"]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn update_addresses_the_entity_by_id() {
    let (service, _fetcher, writer) = service();
    settle().await;

    service
        .update(RequirementId::new(12).unwrap(), form("Rename the field"))
        .await
        .unwrap();

    assert_eq!(writer.calls(), vec!["update:12"]);
}

#[tokio::test(start_paused = true)]
async fn deep_links_render_the_current_constraints() {
    let (service, _fetcher, _writer) = service();
    settle().await;

    service.filter_status(Some(RequirementStatus::Approved));
    settle().await;

    let link = service
        .deep_link(Some(RequirementId::new(9).unwrap()))
        .unwrap();
    assert_eq!(link, "status=3&highlight_id=9");
}
