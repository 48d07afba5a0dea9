use chrono::Utc;

use crate::catalog::RoomType;
use crate::identity::Gender;
use crate::rooms::domain::{LedgerError, Room, RoomDraft};
use crate::testing::{hostel, room, student};

fn male_room(capacity: u8) -> Room {
    let building = hostel("Kuti Hall", Gender::Male);
    room(&building, "A-101", capacity)
}

fn bed_numbers(room: &Room) -> Vec<u8> {
    room.occupants
        .iter()
        .map(|occupant| occupant.bed_number)
        .collect()
}

#[test]
fn assign_numbers_beds_densely_from_one() {
    let mut room = male_room(2);
    let a = student("Ade", Gender::Male);
    let b = student("Bello", Gender::Male);

    let bed = room.assign(a.id.clone(), a.gender, Utc::now()).expect("first bed");
    assert_eq!(bed, 1);
    assert_eq!(room.occupied_beds(), 1);

    let bed = room.assign(b.id.clone(), b.gender, Utc::now()).expect("second bed");
    assert_eq!(bed, 2);
    assert_eq!(room.occupied_beds(), 2);
    assert_eq!(bed_numbers(&room), vec![1, 2]);
    assert!(!room.is_available());
}

#[test]
fn assign_at_capacity_fails_and_leaves_room_unchanged() {
    let mut room = male_room(2);
    let a = student("Ade", Gender::Male);
    let b = student("Bello", Gender::Male);
    let c = student("Chidi", Gender::Male);
    room.assign(a.id.clone(), a.gender, Utc::now()).expect("bed 1");
    room.assign(b.id.clone(), b.gender, Utc::now()).expect("bed 2");

    let before = room.clone();
    match room.assign(c.id.clone(), c.gender, Utc::now()) {
        Err(LedgerError::CapacityExceeded { .. }) => {}
        other => panic!("expected capacity error, got {other:?}"),
    }
    assert_eq!(room.occupants, before.occupants);
    assert_eq!(room.occupied_beds(), 2);
}

#[test]
fn assign_rejects_gender_mismatch_without_mutation() {
    let mut room = male_room(2);
    let s = student("Funke", Gender::Female);

    match room.assign(s.id.clone(), s.gender, Utc::now()) {
        Err(LedgerError::GenderMismatch { room, student }) => {
            assert_eq!(room, "male");
            assert_eq!(student, "female");
        }
        other => panic!("expected gender mismatch, got {other:?}"),
    }
    assert_eq!(room.occupied_beds(), 0);
}

#[test]
fn assign_rejects_duplicate_occupant() {
    let mut room = male_room(3);
    let a = student("Ade", Gender::Male);
    room.assign(a.id.clone(), a.gender, Utc::now()).expect("bed 1");

    match room.assign(a.id.clone(), a.gender, Utc::now()) {
        Err(LedgerError::AlreadyAssigned) => {}
        other => panic!("expected already assigned, got {other:?}"),
    }
    assert_eq!(room.occupied_beds(), 1);
}

#[test]
fn inactive_room_is_never_available() {
    let mut room = male_room(2);
    room.is_active = false;
    let a = student("Ade", Gender::Male);

    assert!(!room.is_available());
    match room.assign(a.id.clone(), a.gender, Utc::now()) {
        Err(LedgerError::CapacityExceeded { .. }) => {}
        other => panic!("expected capacity error for inactive room, got {other:?}"),
    }
}

#[test]
fn release_renumbers_remaining_beds() {
    let mut room = male_room(2);
    let a = student("Ade", Gender::Male);
    let b = student("Bello", Gender::Male);
    room.assign(a.id.clone(), a.gender, Utc::now()).expect("bed 1");
    room.assign(b.id.clone(), b.gender, Utc::now()).expect("bed 2");

    room.release(&a.id).expect("release first occupant");

    assert_eq!(room.occupied_beds(), 1);
    assert_eq!(room.occupants[0].student, b.id);
    assert_eq!(room.occupants[0].bed_number, 1);
    assert!(room.is_available());
}

#[test]
fn release_keeps_bed_numbers_dense_across_many_changes() {
    let mut room = male_room(4);
    let students: Vec<_> = ["Ade", "Bello", "Chidi", "Dayo"]
        .iter()
        .map(|name| student(name, Gender::Male))
        .collect();
    for s in &students {
        room.assign(s.id.clone(), s.gender, Utc::now()).expect("bed");
    }

    room.release(&students[1].id).expect("release second");
    assert_eq!(bed_numbers(&room), vec![1, 2, 3]);

    room.release(&students[3].id).expect("release last");
    assert_eq!(bed_numbers(&room), vec![1, 2]);
    assert_eq!(room.occupied_beds() as usize, room.occupants.len());
}

#[test]
fn release_of_non_occupant_fails() {
    let mut room = male_room(2);
    let a = student("Ade", Gender::Male);

    match room.release(&a.id) {
        Err(LedgerError::NotAnOccupant) => {}
        other => panic!("expected not-an-occupant, got {other:?}"),
    }
}

#[test]
fn occupancy_rate_is_computed() {
    let mut room = male_room(4);
    assert_eq!(room.occupancy_rate(), 0.0);
    let a = student("Ade", Gender::Male);
    room.assign(a.id.clone(), a.gender, Utc::now()).expect("bed 1");
    assert!((room.occupancy_rate() - 25.0).abs() < f32::EPSILON);
}

#[test]
fn draft_rejects_capacity_out_of_range() {
    let building = hostel("Kuti Hall", Gender::Male);
    for capacity in [0u8, 5] {
        let draft = RoomDraft {
            hostel: building.id.clone(),
            number: "B-1".to_string(),
            room_type: RoomType::Standard,
            capacity,
            gender: Gender::Male,
        };
        let errors = draft.validate().expect_err("capacity rejected");
        assert!(errors.iter().any(|error| error.field == "capacity"));
    }
}

#[test]
fn draft_rejects_blank_number() {
    let building = hostel("Kuti Hall", Gender::Male);
    let draft = RoomDraft {
        hostel: building.id.clone(),
        number: "   ".to_string(),
        room_type: RoomType::Standard,
        capacity: 2,
        gender: Gender::Male,
    };
    let errors = draft.validate().expect_err("blank number rejected");
    assert!(errors.iter().any(|error| error.field == "number"));
}
