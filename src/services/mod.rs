//! Per-resource page services.
//!
//! Each service instantiates the generic list controller with its resource's
//! filter schema and page-size default, and performs create/update/delete
//! calls through the writer seam, always followed by an explicit refresh so
//! the list reflects server truth.

use thiserror::Error;

use crate::deeplink::DeepLinkError;
use crate::domain::types::TypeConstraintError;
use crate::fetch::errors::FetchError;
use crate::query::QueryError;

pub mod members;
pub mod projects;
pub mod requirements;
pub mod tasks;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-level form validation failures, surfaced inline by the page
    /// next to the offending fields. List state is untouched.
    #[error("form validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    DeepLink(#[from] DeepLinkError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
