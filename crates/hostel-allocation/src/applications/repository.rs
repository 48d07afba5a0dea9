use super::domain::{Application, ApplicationId, Semester};
use crate::error::RepositoryError;
use crate::identity::UserId;
use crate::rooms::RoomId;

/// Listing filters for the admin application index.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<String>,
    pub academic_year: Option<String>,
}

/// Storage abstraction over applications.
pub trait ApplicationRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the id or the
    /// student-plus-term pair is already stored. The term check must run
    /// atomically with the write; it is the authoritative uniqueness gate.
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError>;
    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError>;
    fn list_for(&self, student: &UserId) -> Result<Vec<Application>, RepositoryError>;
    /// The uniqueness probe behind "one application per student per term".
    fn find_for_term(
        &self,
        student: &UserId,
        academic_year: &str,
        semester: Semester,
    ) -> Result<Option<Application>, RepositoryError>;
    /// Applications currently assigned to the given room.
    fn assigned_to_room(&self, room: &RoomId) -> Result<Vec<Application>, RepositoryError>;
}
