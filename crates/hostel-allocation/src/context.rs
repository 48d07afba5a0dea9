use std::sync::Arc;

use crate::allocation::AllocationService;
use crate::applications::ApplicationService;
use crate::catalog::CatalogService;
use crate::identity::IdentityService;
use crate::reports::ReportsService;
use crate::rooms::RoomService;

/// Shared handler state: one service per workflow, all over the same
/// repository instances.
#[derive(Clone)]
pub struct AppContext {
    pub identity: Arc<IdentityService>,
    pub catalog: Arc<CatalogService>,
    pub rooms: Arc<RoomService>,
    pub applications: Arc<ApplicationService>,
    pub allocation: Arc<AllocationService>,
    pub reports: Arc<ReportsService>,
}
