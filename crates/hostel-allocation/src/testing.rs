//! Fixtures shared by the module test suites.

use chrono::Utc;

use crate::applications::{
    Application, ApplicationForm, ApplicationId, ApplicationStatus, GuardianInfo, PersonalInfo,
    Preference, Semester,
};
use crate::catalog::{Hostel, HostelId, RoomType};
use crate::identity::{CredentialDigest, Gender, Role, User, UserId};
use crate::rooms::Room;

pub(crate) use crate::memory::{
    MemoryApplications, MemoryHostels, MemoryRooms, MemoryTokens, MemoryUsers,
};

pub(crate) fn student(name: &str, gender: Gender) -> User {
    User {
        id: UserId::generate(),
        full_name: name.to_string(),
        email: format!("{}@student.edu", name.to_ascii_lowercase().replace(' ', ".")),
        matric_number: Some(format!("HST/{}", name.len() * 111)),
        gender,
        role: Role::Student,
        credential: CredentialDigest::new("sturdy-passphrase"),
        created_at: Utc::now(),
    }
}

pub(crate) fn admin(name: &str) -> User {
    User {
        id: UserId::generate(),
        full_name: name.to_string(),
        email: format!("{}@hostel.edu", name.to_ascii_lowercase()),
        matric_number: None,
        gender: Gender::Female,
        role: Role::Admin,
        credential: CredentialDigest::new("sturdy-passphrase"),
        created_at: Utc::now(),
    }
}

pub(crate) fn hostel(name: &str, gender: Gender) -> Hostel {
    let mut prices = std::collections::BTreeMap::new();
    prices.insert(RoomType::Standard, 45_000);
    prices.insert(RoomType::Shared, 30_000);
    Hostel {
        id: HostelId::generate(),
        name: name.to_string(),
        gender,
        prices,
        is_active: true,
    }
}

pub(crate) fn room(hostel: &Hostel, number: &str, capacity: u8) -> Room {
    Room::new(
        hostel.id.clone(),
        number.to_string(),
        RoomType::Shared,
        capacity,
        hostel.gender,
    )
}

pub(crate) fn application_form(academic_year: &str, semester: Semester) -> ApplicationForm {
    ApplicationForm {
        academic_year: academic_year.to_string(),
        semester,
        personal: PersonalInfo {
            phone: "+2348012345678".to_string(),
            address: "14 College Road, Yaba".to_string(),
        },
        guardian: GuardianInfo {
            name: "P. Adeyemi".to_string(),
            phone: "08087654321".to_string(),
        },
        preference: Preference {
            hostel: None,
            room_type: RoomType::Shared,
        },
    }
}

pub(crate) fn pending_application(student: &User, academic_year: &str, semester: Semester) -> Application {
    let form = application_form(academic_year, semester);
    Application {
        id: ApplicationId::generate(),
        student: student.id.clone(),
        academic_year: form.academic_year,
        semester: form.semester,
        personal: form.personal,
        guardian: form.guardian,
        preference: form.preference,
        status: ApplicationStatus::Pending,
        submitted_at: Utc::now(),
    }
}
