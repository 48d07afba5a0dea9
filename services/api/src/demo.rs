use crate::infra::build_context;
use chrono::{Datelike, Local};
use clap::Args;
use hostel_allocation::allocation::AssignmentRequest;
use hostel_allocation::applications::{
    ApplicationForm, GuardianInfo, PersonalInfo, Preference, Semester,
};
use hostel_allocation::catalog::{HostelForm, RoomType};
use hostel_allocation::error::AppError;
use hostel_allocation::identity::{Gender, RegisterForm};
use hostel_allocation::rooms::RoomDraft;
use std::collections::BTreeMap;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Academic year for the demo applications (YYYY/YYYY). Defaults to the
    /// session starting this calendar year.
    #[arg(long)]
    pub(crate) academic_year: Option<String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let academic_year = args.academic_year.unwrap_or_else(|| {
        let year = Local::now().year();
        format!("{year}/{}", year + 1)
    });

    println!("Hostel allocation demo ({academic_year})");

    let context = build_context(60);
    let warden = context.identity.provision_admin(
        "Hall Administrator",
        "warden@hostel.edu",
        "demo-only-password",
        Gender::Female,
    )?;
    println!("- Provisioned administrator {}", warden.email);

    let ade = context.identity.register(RegisterForm {
        full_name: "Ade Okafor".to_string(),
        email: "ade@student.edu".to_string(),
        matric_number: "HST/2024/001".to_string(),
        gender: Gender::Male,
        password: "demo-only-password".to_string(),
    })?;
    let bello = context.identity.register(RegisterForm {
        full_name: "Bello Musa".to_string(),
        email: "bello@student.edu".to_string(),
        matric_number: "HST/2024/002".to_string(),
        gender: Gender::Male,
        password: "demo-only-password".to_string(),
    })?;
    println!("- Registered students {} and {}", ade.email, bello.email);

    let mut prices = BTreeMap::new();
    prices.insert(RoomType::Shared, 30_000);
    prices.insert(RoomType::Standard, 45_000);
    let hostel = context.catalog.create(HostelForm {
        name: "Kuti Hall".to_string(),
        gender: Gender::Male,
        prices,
    })?;
    let room = context.rooms.create(RoomDraft {
        hostel: hostel.id.clone(),
        number: "A-101".to_string(),
        room_type: RoomType::Shared,
        capacity: 2,
        gender: Gender::Male,
    })?;
    println!(
        "- Created {} room {} ({} beds)",
        hostel.name, room.number, room.capacity
    );

    let form = ApplicationForm {
        academic_year: academic_year.clone(),
        semester: Semester::First,
        personal: PersonalInfo {
            phone: "+2348012345678".to_string(),
            address: "14 College Road, Yaba".to_string(),
        },
        guardian: GuardianInfo {
            name: "P. Okafor".to_string(),
            phone: "08087654321".to_string(),
        },
        preference: Preference {
            hostel: Some(hostel.id.clone()),
            room_type: RoomType::Shared,
        },
    };
    let application = context.applications.submit(&ade, form.clone())?;
    let second = context.applications.submit(&bello, form)?;
    println!(
        "- Submitted applications {} and {}",
        application.id.0, second.id.0
    );

    let approved = context.applications.approve(
        &application.id,
        &warden,
        "Meets eligibility criteria".to_string(),
    )?;
    let rejected = context.applications.reject(
        &second.id,
        &warden,
        "No documentation provided".to_string(),
    )?;
    println!(
        "- Review outcomes: {} -> {}, {} -> {}",
        approved.id.0,
        approved.status.label(),
        rejected.id.0,
        rejected.status.label()
    );

    let outcome = context.allocation.assign(AssignmentRequest {
        student: ade.id.clone(),
        room: room.id.clone(),
        application: Some(approved.id.clone()),
    })?;
    println!(
        "- Assigned {} to room {} bed {}",
        ade.full_name, outcome.room.number, outcome.bed_number
    );

    let dashboard = context.reports.dashboard()?;
    match serde_json::to_string_pretty(&dashboard) {
        Ok(json) => println!("\nDashboard snapshot:\n{json}"),
        Err(err) => println!("\nDashboard snapshot unavailable: {err}"),
    }

    let release = context.allocation.release(&room.id, &ade.id)?;
    let reset_label = release
        .reset_application
        .map(|application| application.status.label())
        .unwrap_or("none");
    println!(
        "\n- Released {} from room {}; application reset to {}",
        ade.full_name, release.room.number, reset_label
    );

    let occupancy = context.reports.occupancy()?;
    println!(
        "- Final occupancy: {:.0}% across {} hostel(s)",
        occupancy.overall_rate,
        occupancy.hostels.len()
    );

    Ok(())
}
