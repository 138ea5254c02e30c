//! Asynchronous client core for a Cloud Foundry-style Cloud Controller API.
//!
//! # Overview
//! Each operation pairs an immutable request value (with field-level
//! validation) to one HTTP call. Requests are checked via the [`Validatable`]
//! contract before any network traffic; list operations traverse paginated
//! collections as a lazy, strictly sequential stream of resource entries.
//!
//! # Design
//! - The core performs no I/O itself: it builds [`HttpRequest`] descriptors
//!   and interprets [`HttpResponse`] values, delegating the round-trip to a
//!   caller-supplied [`Transport`].
//! - Validation collects *all* violations into a [`ValidationResult`] rather
//!   than stopping at the first; an invalid request never reaches the wire.
//! - Pagination fetches one page at a time — the page count is only known
//!   once the first page returns — and surfaces a page failure at the point
//!   reached, with no retry.
//! - Non-2xx responses are translated into [`CloudFoundryError`] from the
//!   server's `code`/`description`/`error_code` payload.

pub mod applications;
pub mod client;
pub mod error;
pub mod http;
pub mod info;
pub mod organizations;
pub mod pagination;
pub mod processes;
pub mod resource;
pub mod service_bindings;
pub mod service_instances;
pub mod shared_domains;
pub mod spaces;
pub mod transport;
pub mod users;

mod operations;
mod query;
pub mod validation;

pub use client::CloudFoundryClient;
pub use error::{ApiError, CloudFoundryError, RequestFailed};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::{request_pages, request_resources, PaginatedResponse};
pub use resource::{Metadata, Page, PagedResources, Pagination, Resource};
pub use transport::Transport;
pub use validation::{Status, Validatable, ValidationResult};
