use std::sync::Arc;

use chrono::Utc;

use crate::applications::repository::ApplicationRepository;
use crate::applications::Semester;
use crate::catalog::HostelRepository;
use crate::identity::{Gender, UserRepository};
use crate::reports::service::ReportsService;
use crate::rooms::RoomRepository;
use crate::testing::{
    admin, hostel, pending_application, room, student, MemoryApplications, MemoryHostels,
    MemoryRooms, MemoryUsers,
};

struct Fixture {
    service: ReportsService,
    users: Arc<MemoryUsers>,
    hostels: Arc<MemoryHostels>,
    rooms: Arc<MemoryRooms>,
    applications: Arc<MemoryApplications>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MemoryUsers::default());
    let hostels = Arc::new(MemoryHostels::default());
    let rooms = Arc::new(MemoryRooms::default());
    let applications = Arc::new(MemoryApplications::default());
    let service = ReportsService::new(
        users.clone(),
        hostels.clone(),
        rooms.clone(),
        applications.clone(),
    );
    Fixture {
        service,
        users,
        hostels,
        rooms,
        applications,
    }
}

#[test]
fn dashboard_counts_reflect_stored_state() {
    let fx = fixture();
    let a = student("Ade", Gender::Male);
    let b = student("Bello", Gender::Male);
    let warden = admin("warden");
    fx.users.insert(a.clone()).expect("student stored");
    fx.users.insert(b.clone()).expect("student stored");
    fx.users.insert(warden.clone()).expect("admin stored");

    let building = hostel("Kuti Hall", Gender::Male);
    fx.hostels.insert(building.clone()).expect("hostel stored");

    let mut full = room(&building, "A-101", 2);
    full.assign(a.id.clone(), a.gender, Utc::now()).expect("bed 1");
    full.assign(b.id.clone(), b.gender, Utc::now()).expect("bed 2");
    fx.rooms.insert(full).expect("room stored");
    fx.rooms.insert(room(&building, "A-102", 2)).expect("room stored");

    let mut reviewed = pending_application(&a, "2024/2025", Semester::First);
    reviewed
        .approve(warden.id.clone(), "ok".to_string(), Utc::now())
        .expect("approve");
    fx.applications.insert(reviewed).expect("application stored");
    fx.applications
        .insert(pending_application(&b, "2024/2025", Semester::First))
        .expect("application stored");

    let dashboard = fx.service.dashboard().expect("dashboard builds");

    assert_eq!(dashboard.students, 2, "admins are not students");
    assert_eq!(dashboard.hostels, 1);
    assert_eq!(dashboard.rooms, 2);
    assert_eq!(dashboard.available_rooms, 1);
    assert_eq!(dashboard.total_beds, 4);
    assert_eq!(dashboard.occupied_beds, 2);
    assert!((dashboard.occupancy_rate - 50.0).abs() < f32::EPSILON);
    assert_eq!(dashboard.applications.pending, 1);
    assert_eq!(dashboard.applications.approved, 1);
    assert_eq!(dashboard.applications.total(), 2);
}

#[test]
fn occupancy_report_rolls_up_per_hostel() {
    let fx = fixture();
    let male_hall = hostel("Kuti Hall", Gender::Male);
    let female_hall = hostel("Queens Hall", Gender::Female);
    fx.hostels.insert(male_hall.clone()).expect("hostel stored");
    fx.hostels.insert(female_hall.clone()).expect("hostel stored");

    let a = student("Ade", Gender::Male);
    fx.users.insert(a.clone()).expect("student stored");
    let mut occupied = room(&male_hall, "A-101", 4);
    occupied.assign(a.id.clone(), a.gender, Utc::now()).expect("bed 1");
    fx.rooms.insert(occupied).expect("room stored");
    fx.rooms
        .insert(room(&female_hall, "Q-1", 2))
        .expect("room stored");

    let report = fx.service.occupancy().expect("report builds");
    assert_eq!(report.hostels.len(), 2);

    let kuti = report
        .hostels
        .iter()
        .find(|entry| entry.hostel == "Kuti Hall")
        .expect("entry present");
    assert_eq!(kuti.capacity, 4);
    assert_eq!(kuti.occupied, 1);
    assert!((kuti.occupancy_rate - 25.0).abs() < f32::EPSILON);

    let queens = report
        .hostels
        .iter()
        .find(|entry| entry.hostel == "Queens Hall")
        .expect("entry present");
    assert_eq!(queens.occupied, 0);
    assert!((report.overall_rate - 100.0 / 6.0).abs() < 0.01);
}

#[test]
fn applications_report_filters_by_year_and_breaks_down_preferences() {
    let fx = fixture();
    let a = student("Ade", Gender::Male);
    let b = student("Bello", Gender::Male);

    fx.applications
        .insert(pending_application(&a, "2024/2025", Semester::First))
        .expect("application stored");
    fx.applications
        .insert(pending_application(&b, "2024/2025", Semester::Second))
        .expect("application stored");
    fx.applications
        .insert(pending_application(&a, "2025/2026", Semester::First))
        .expect("application stored");

    let filtered = fx
        .service
        .applications(Some("2024/2025".to_string()))
        .expect("report builds");
    assert_eq!(filtered.by_status.total(), 2);
    assert_eq!(filtered.by_room_type.get("shared"), Some(&2));

    let all = fx.service.applications(None).expect("report builds");
    assert_eq!(all.by_status.total(), 3);
}
