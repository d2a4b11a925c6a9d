//! worklog: a server-rendered attendance tracker.
//!
//! Work items (a user, a timestamp and a free-text time type such as `in` or
//! `out`) live in a single Postgres table. The crate is split into:
//!
//! * `model`: the `WorkItem` record
//! * `repository`: typed access to the `workitems` table
//! * `index`: the per-request (user, day, type) grouping behind the listing
//! * `views`: HTML rendering for the listing and edit pages
//! * `handlers` / `routing`: the axum surface

pub mod handlers;
pub mod index;
pub mod model;
pub mod repository;
pub mod routing;
pub mod views;

pub use index::{aggregate, IndexKey, WorkIndex};
pub use model::WorkItem;
pub use repository::{PgWorkItemRepository, WorkItemStore};
pub use routing::{build_router, AppState};
