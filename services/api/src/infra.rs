use hostel_allocation::allocation::AllocationService;
use hostel_allocation::applications::{ApplicationRepository, ApplicationService};
use hostel_allocation::catalog::{CatalogService, HostelRepository};
use hostel_allocation::context::AppContext;
use hostel_allocation::identity::{IdentityService, TokenStore, UserRepository};
use hostel_allocation::memory::{
    MemoryApplications, MemoryHostels, MemoryRooms, MemoryTokens, MemoryUsers,
};
use hostel_allocation::reports::ReportsService;
use hostel_allocation::rooms::{RoomRepository, RoomService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire every service over fresh in-memory repositories.
pub(crate) fn build_context(token_ttl_minutes: i64) -> AppContext {
    let users: Arc<dyn UserRepository> = Arc::new(MemoryUsers::default());
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokens::default());
    let hostels: Arc<dyn HostelRepository> = Arc::new(MemoryHostels::default());
    let rooms: Arc<dyn RoomRepository> = Arc::new(MemoryRooms::default());
    let applications: Arc<dyn ApplicationRepository> = Arc::new(MemoryApplications::default());

    AppContext {
        identity: Arc::new(IdentityService::new(
            users.clone(),
            tokens,
            token_ttl_minutes,
        )),
        catalog: Arc::new(CatalogService::new(hostels.clone())),
        rooms: Arc::new(RoomService::new(rooms.clone(), hostels.clone())),
        applications: Arc::new(ApplicationService::new(applications.clone(), rooms.clone())),
        allocation: Arc::new(AllocationService::new(
            users.clone(),
            rooms.clone(),
            applications.clone(),
        )),
        reports: Arc::new(ReportsService::new(users, hostels, rooms, applications)),
    }
}
