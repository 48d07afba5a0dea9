//! University hostel allocation backend.
//!
//! Students submit housing applications, administrators review them and
//! assign beds, and occupancy statistics are computed on demand. The room
//! ledger ([`rooms`]), the application state machine ([`applications`]), and
//! the cross-entity assignment transaction ([`allocation`]) carry the real
//! invariants; everything else is the plumbing around them.

pub mod allocation;
pub mod applications;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod identity;
pub mod memory;
pub mod reports;
pub mod rooms;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

use axum::Router;
use context::AppContext;

/// The full API surface. Health, readiness, and metrics endpoints are wired
/// by the binary on top of this.
pub fn api_router() -> Router<AppContext> {
    Router::new()
        .merge(identity::router::auth_router())
        .merge(catalog::router::catalog_router())
        .merge(rooms::router::rooms_router())
        .merge(allocation::router::allocation_router())
        .merge(applications::router::applications_router())
        .merge(reports::router::reports_router())
}
