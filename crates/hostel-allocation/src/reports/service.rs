use std::collections::BTreeMap;
use std::sync::Arc;

use super::views::{
    rate, ApplicationsReport, DashboardView, HostelOccupancyEntry, OccupancyReport,
    StatusBreakdown,
};
use crate::applications::{Application, ApplicationFilter, ApplicationRepository, ApplicationStatus};
use crate::catalog::HostelRepository;
use crate::error::AppError;
use crate::identity::UserRepository;
use crate::rooms::{RoomFilter, RoomRepository};

/// Aggregation queries for the admin dashboard and reports. Reads may run
/// concurrently with mutations; the numbers are a consistent-enough snapshot.
pub struct ReportsService {
    users: Arc<dyn UserRepository>,
    hostels: Arc<dyn HostelRepository>,
    rooms: Arc<dyn RoomRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl ReportsService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hostels: Arc<dyn HostelRepository>,
        rooms: Arc<dyn RoomRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            users,
            hostels,
            rooms,
            applications,
        }
    }

    pub fn dashboard(&self) -> Result<DashboardView, AppError> {
        let users = self.users.list()?;
        let hostels = self.hostels.list()?;
        let rooms = self.rooms.list(&RoomFilter::default())?;
        let applications = self.applications.list(&ApplicationFilter::default())?;

        let students = users.iter().filter(|user| user.is_student()).count();
        let active_rooms = rooms.iter().filter(|room| room.is_active).count();
        let available_rooms = rooms.iter().filter(|room| room.is_available()).count();
        let total_beds: u32 = rooms.iter().map(|room| u32::from(room.capacity)).sum();
        let occupied_beds: u32 = rooms
            .iter()
            .map(|room| u32::from(room.occupied_beds()))
            .sum();

        Ok(DashboardView {
            students,
            hostels: hostels.len(),
            rooms: rooms.len(),
            active_rooms,
            available_rooms,
            total_beds,
            occupied_beds,
            occupancy_rate: rate(occupied_beds, total_beds),
            applications: breakdown(&applications),
        })
    }

    pub fn occupancy(&self) -> Result<OccupancyReport, AppError> {
        let hostels = self.hostels.list()?;
        let rooms = self.rooms.list(&RoomFilter::default())?;

        let mut entries = Vec::with_capacity(hostels.len());
        let mut overall_capacity = 0u32;
        let mut overall_occupied = 0u32;

        for hostel in &hostels {
            let hostel_rooms: Vec<_> = rooms
                .iter()
                .filter(|room| room.hostel == hostel.id)
                .collect();
            let capacity: u32 = hostel_rooms
                .iter()
                .map(|room| u32::from(room.capacity))
                .sum();
            let occupied: u32 = hostel_rooms
                .iter()
                .map(|room| u32::from(room.occupied_beds()))
                .sum();
            overall_capacity += capacity;
            overall_occupied += occupied;

            entries.push(HostelOccupancyEntry {
                hostel: hostel.name.clone(),
                rooms: hostel_rooms.len(),
                capacity,
                occupied,
                available_rooms: hostel_rooms
                    .iter()
                    .filter(|room| room.is_available())
                    .count(),
                occupancy_rate: rate(occupied, capacity),
            });
        }

        Ok(OccupancyReport {
            hostels: entries,
            overall_rate: rate(overall_occupied, overall_capacity),
        })
    }

    pub fn applications(
        &self,
        academic_year: Option<String>,
    ) -> Result<ApplicationsReport, AppError> {
        let filter = ApplicationFilter {
            status: None,
            academic_year: academic_year.clone(),
        };
        let applications = self.applications.list(&filter)?;

        let mut by_room_type: BTreeMap<String, usize> = BTreeMap::new();
        for application in &applications {
            *by_room_type
                .entry(application.preference.room_type.label().to_string())
                .or_insert(0) += 1;
        }

        Ok(ApplicationsReport {
            academic_year,
            by_status: breakdown(&applications),
            by_room_type,
        })
    }
}

fn breakdown(applications: &[Application]) -> StatusBreakdown {
    let mut counts = StatusBreakdown::default();
    for application in applications {
        match application.status {
            ApplicationStatus::Pending => counts.pending += 1,
            ApplicationStatus::Approved { .. } => counts.approved += 1,
            ApplicationStatus::Rejected { .. } => counts.rejected += 1,
            ApplicationStatus::Assigned { .. } => counts.assigned += 1,
        }
    }
    counts
}
