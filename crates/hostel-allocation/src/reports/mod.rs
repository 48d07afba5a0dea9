//! Read-only rollups over users, rooms, and applications. Computed per
//! request from current state; nothing here writes or caches.

pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use service::ReportsService;
pub use views::{
    ApplicationsReport, DashboardView, HostelOccupancyEntry, OccupancyReport, StatusBreakdown,
};
