use super::domain::{Hostel, HostelId};
use crate::error::RepositoryError;

/// Storage abstraction over hostel metadata.
pub trait HostelRepository: Send + Sync {
    fn insert(&self, hostel: Hostel) -> Result<Hostel, RepositoryError>;
    fn fetch(&self, id: &HostelId) -> Result<Option<Hostel>, RepositoryError>;
    fn fetch_by_name(&self, name: &str) -> Result<Option<Hostel>, RepositoryError>;
    fn list(&self) -> Result<Vec<Hostel>, RepositoryError>;
}
