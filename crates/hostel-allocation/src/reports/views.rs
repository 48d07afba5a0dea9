use std::collections::BTreeMap;

use serde::Serialize;

/// Application counts keyed by lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub assigned: usize,
}

impl StatusBreakdown {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected + self.assigned
    }
}

/// Headline numbers for the admin landing page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub students: usize,
    pub hostels: usize,
    pub rooms: usize,
    pub active_rooms: usize,
    pub available_rooms: usize,
    pub total_beds: u32,
    pub occupied_beds: u32,
    /// `occupied / total * 100`, computed, never stored.
    pub occupancy_rate: f32,
    pub applications: StatusBreakdown,
}

/// Per-hostel occupancy rollup.
#[derive(Debug, Clone, Serialize)]
pub struct HostelOccupancyEntry {
    pub hostel: String,
    pub rooms: usize,
    pub capacity: u32,
    pub occupied: u32,
    pub available_rooms: usize,
    pub occupancy_rate: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OccupancyReport {
    pub hostels: Vec<HostelOccupancyEntry>,
    pub overall_rate: f32,
}

/// Per-term application rollup with the advisory preference distribution.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    pub by_status: StatusBreakdown,
    pub by_room_type: BTreeMap<String, usize>,
}

pub(crate) fn rate(occupied: u32, capacity: u32) -> f32 {
    if capacity == 0 {
        0.0
    } else {
        occupied as f32 / capacity as f32 * 100.0
    }
}
