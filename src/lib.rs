//! Client-side list-state core for the project/requirements admin UI.
//!
//! Every admin page is a paginated, filtered, searched list over one REST
//! resource. [`controller::ListController`] implements that state machine
//! once — debounced search, typed filters, duplicate suppression and
//! stale-response discard — and [`services`] instantiates it per resource.

pub mod config;
pub mod controller;
pub mod deeplink;
pub mod domain;
pub mod dto;
pub mod fetch;
pub mod forms;
pub mod highlight;
pub mod pagination;
pub mod query;
pub mod services;

/// Debounce window applied to search input before it commits, in ms.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// How long a deep-link highlight stays applied, in ms.
pub const DEFAULT_HIGHLIGHT_MS: u64 = 3500;
