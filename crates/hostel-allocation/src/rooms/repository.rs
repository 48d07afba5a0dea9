use super::domain::{Room, RoomId};
use crate::catalog::HostelId;
use crate::error::RepositoryError;
use crate::identity::UserId;

/// Listing filters for the admin room index.
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub hostel: Option<HostelId>,
    pub available_only: bool,
}

/// Storage abstraction over the room ledger.
pub trait RoomRepository: Send + Sync {
    fn insert(&self, room: Room) -> Result<Room, RepositoryError>;
    fn update(&self, room: Room) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RoomId) -> Result<Option<Room>, RepositoryError>;
    fn delete(&self, id: &RoomId) -> Result<(), RepositoryError>;
    fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, RepositoryError>;
    fn find_by_number(
        &self,
        hostel: &HostelId,
        number: &str,
    ) -> Result<Option<Room>, RepositoryError>;
    /// The room currently housing a student, if any. This lookup is the
    /// single source of truth for "does this student hold a room".
    fn room_of(&self, student: &UserId) -> Result<Option<Room>, RepositoryError>;
}
