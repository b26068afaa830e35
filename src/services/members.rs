//! Department members page service.

use std::sync::Arc;

use validator::Validate;

use crate::controller::{ListConfig, ListController};
use crate::deeplink::{self, MemberListParams};
use crate::domain::member::{Member, NewMember, UpdateMember};
use crate::domain::types::{DepartmentId, MemberId};
use crate::fetch::{ResourceFetcher, ResourceWriter};
use crate::forms::user::MemberForm;
use crate::query::{FilterKind, FilterSchema, FilterSpec};
use crate::services::ServiceResult;

/// Filters the members list recognizes.
pub const FILTERS: FilterSchema =
    FilterSchema::new(&[FilterSpec::new("department_id", FilterKind::Int)]);

/// Members render as cards; the page defaults to the denser size.
pub fn default_config() -> ListConfig {
    ListConfig::with_default_page_size(20)
}

pub type MemberWriter = dyn ResourceWriter<NewMember, UpdateMember>;

pub struct MembersService {
    list: ListController<Member>,
    writer: Arc<MemberWriter>,
}

impl MembersService {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher<Member>>,
        writer: Arc<MemberWriter>,
        config: ListConfig,
    ) -> Self {
        Self {
            list: ListController::new(fetcher, FILTERS, config),
            writer,
        }
    }

    pub fn list(&self) -> &ListController<Member> {
        &self.list
    }

    pub fn filter_department(&self, department: Option<DepartmentId>) {
        let _ = self
            .list
            .set_filter("department_id", department.map(|id| id.get().into()));
    }

    pub fn apply_params(&self, params: &MemberListParams) {
        deeplink::apply(&self.list, params);
    }

    pub async fn add(&self, form: MemberForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = NewMember::try_from(form)?;
        self.writer.create(&payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn update(&self, id: MemberId, form: MemberForm) -> ServiceResult<()> {
        form.validate()?;
        let payload = UpdateMember::from(form);
        self.writer.update(id.get(), &payload).await?;
        self.list.refresh();
        Ok(())
    }

    pub async fn remove(&self, id: MemberId) -> ServiceResult<()> {
        self.writer.delete(id.get()).await?;
        self.list.refresh();
        Ok(())
    }
}
