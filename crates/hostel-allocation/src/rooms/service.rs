use std::sync::Arc;

use super::domain::{Room, RoomDraft, RoomId};
use super::repository::{RoomFilter, RoomRepository};
use crate::catalog::HostelRepository;
use crate::error::{AppError, FieldError};

/// Room CRUD. Occupancy mutations go through the allocation service, never
/// through here.
pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
    hostels: Arc<dyn HostelRepository>,
}

impl RoomService {
    pub fn new(rooms: Arc<dyn RoomRepository>, hostels: Arc<dyn HostelRepository>) -> Self {
        Self { rooms, hostels }
    }

    pub fn create(&self, draft: RoomDraft) -> Result<Room, AppError> {
        draft.validate().map_err(AppError::validation)?;

        let hostel = self
            .hostels
            .fetch(&draft.hostel)?
            .ok_or_else(|| AppError::not_found("hostel"))?;

        if draft.gender != hostel.gender {
            return Err(AppError::validation(vec![FieldError::new(
                "gender",
                format!(
                    "room gender must match the hostel restriction ({})",
                    hostel.gender.label()
                ),
            )]));
        }

        let number = draft.number.trim().to_string();
        if self.rooms.find_by_number(&hostel.id, &number)?.is_some() {
            return Err(AppError::conflict(format!(
                "room {number} already exists in {}",
                hostel.name
            )));
        }

        let room = Room::new(hostel.id, number, draft.room_type, draft.capacity, draft.gender);
        Ok(self.rooms.insert(room)?)
    }

    pub fn fetch(&self, id: &RoomId) -> Result<Room, AppError> {
        self.rooms
            .fetch(id)?
            .ok_or_else(|| AppError::not_found("room"))
    }

    pub fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        Ok(self.rooms.list(filter)?)
    }

    /// Deletion is blocked while any bed is occupied; release the occupants
    /// first.
    pub fn delete(&self, id: &RoomId) -> Result<(), AppError> {
        let room = self.fetch(id)?;
        if room.occupied_beds() > 0 {
            return Err(AppError::state(
                "room still has occupants and cannot be deleted",
            ));
        }
        self.rooms.delete(id)?;
        Ok(())
    }

    pub fn deactivate(&self, id: &RoomId) -> Result<Room, AppError> {
        let mut room = self.fetch(id)?;
        room.is_active = false;
        self.rooms.update(room.clone())?;
        Ok(room)
    }
}
