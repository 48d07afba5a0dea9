use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{HostelId, RoomType};
use crate::error::FieldError;
use crate::identity::{Gender, UserId};

pub const MIN_CAPACITY: u8 = 1;
pub const MAX_CAPACITY: u8 = 4;

/// Identifier wrapper for rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// One occupied bed. Bed numbers are display labels re-derived on every
/// occupancy change, not stable identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub student: UserId,
    pub bed_number: u8,
    pub assigned_at: DateTime<Utc>,
}

/// Failures raised by the ledger itself. The caller-side "student already
/// holds some other room" check lives in the allocation service.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("room {room} has no free bed")]
    CapacityExceeded { room: String },
    #[error("room accepts {room} students, applicant is {student}")]
    GenderMismatch {
        room: &'static str,
        student: &'static str,
    },
    #[error("student is already an occupant of this room")]
    AlreadyAssigned,
    #[error("student is not an occupant of this room")]
    NotAnOccupant,
}

/// The central mutable aggregate. `occupied_beds` is derived from the
/// occupant list, so it can never disagree with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub hostel: HostelId,
    pub number: String,
    pub room_type: RoomType,
    pub capacity: u8,
    pub gender: Gender,
    pub occupants: Vec<Occupant>,
    pub is_active: bool,
}

impl Room {
    pub fn new(
        hostel: HostelId,
        number: String,
        room_type: RoomType,
        capacity: u8,
        gender: Gender,
    ) -> Self {
        Self {
            id: RoomId::generate(),
            hostel,
            number,
            room_type,
            capacity,
            gender,
            occupants: Vec::new(),
            is_active: true,
        }
    }

    pub fn occupied_beds(&self) -> u8 {
        self.occupants.len() as u8
    }

    pub fn is_available(&self) -> bool {
        self.is_active && self.occupied_beds() < self.capacity
    }

    pub fn occupancy_rate(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        f32::from(self.occupied_beds()) / f32::from(self.capacity) * 100.0
    }

    pub fn occupant_of(&self, student: &UserId) -> Option<&Occupant> {
        self.occupants
            .iter()
            .find(|occupant| &occupant.student == student)
    }

    /// Append an occupant on the next bed. The room is left untouched on any
    /// failure.
    pub fn assign(
        &mut self,
        student: UserId,
        gender: Gender,
        at: DateTime<Utc>,
    ) -> Result<u8, LedgerError> {
        if self.occupant_of(&student).is_some() {
            return Err(LedgerError::AlreadyAssigned);
        }
        if !self.is_available() {
            return Err(LedgerError::CapacityExceeded {
                room: self.number.clone(),
            });
        }
        if gender != self.gender {
            return Err(LedgerError::GenderMismatch {
                room: self.gender.label(),
                student: gender.label(),
            });
        }

        let bed_number = self.occupied_beds() + 1;
        self.occupants.push(Occupant {
            student,
            bed_number,
            assigned_at: at,
        });
        Ok(bed_number)
    }

    /// Remove an occupant and renumber the remaining beds densely from 1.
    /// A full re-index on every removal is intentional: occupancy is at most
    /// `MAX_CAPACITY`, and physical beds are interchangeable.
    pub fn release(&mut self, student: &UserId) -> Result<(), LedgerError> {
        let position = self
            .occupants
            .iter()
            .position(|occupant| &occupant.student == student)
            .ok_or(LedgerError::NotAnOccupant)?;

        self.occupants.remove(position);
        for (index, occupant) in self.occupants.iter_mut().enumerate() {
            occupant.bed_number = index as u8 + 1;
        }
        Ok(())
    }
}

/// Admin payload for creating a room.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDraft {
    pub hostel: HostelId,
    pub number: String,
    pub room_type: RoomType,
    pub capacity: u8,
    pub gender: Gender,
}

impl RoomDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.number.trim().is_empty() {
            errors.push(FieldError::new("number", "room number is required"));
        }
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            errors.push(FieldError::new(
                "capacity",
                format!("capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Serializable room snapshot with the derived figures spelled out.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub id: RoomId,
    pub hostel: HostelId,
    pub number: String,
    pub room_type: RoomType,
    pub capacity: u8,
    pub occupied_beds: u8,
    pub gender: Gender,
    pub is_active: bool,
    pub is_available: bool,
    pub occupants: Vec<Occupant>,
}

impl From<&Room> for RoomView {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            hostel: room.hostel.clone(),
            number: room.number.clone(),
            room_type: room.room_type,
            capacity: room.capacity,
            occupied_beds: room.occupied_beds(),
            gender: room.gender,
            is_active: room.is_active,
            is_available: room.is_available(),
            occupants: room.occupants.clone(),
        }
    }
}
