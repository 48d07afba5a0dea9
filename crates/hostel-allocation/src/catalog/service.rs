use std::sync::Arc;

use super::domain::{Hostel, HostelForm, HostelId};
use super::repository::HostelRepository;
use crate::error::AppError;

/// Hostel catalog maintenance. Create and read only; occupancy lives on rooms.
pub struct CatalogService {
    hostels: Arc<dyn HostelRepository>,
}

impl CatalogService {
    pub fn new(hostels: Arc<dyn HostelRepository>) -> Self {
        Self { hostels }
    }

    pub fn create(&self, form: HostelForm) -> Result<Hostel, AppError> {
        form.validate().map_err(AppError::validation)?;

        let name = form.name.trim().to_string();
        if self.hostels.fetch_by_name(&name)?.is_some() {
            return Err(AppError::conflict("a hostel with this name already exists"));
        }

        let hostel = Hostel {
            id: HostelId::generate(),
            name,
            gender: form.gender,
            prices: form.prices,
            is_active: true,
        };
        Ok(self.hostels.insert(hostel)?)
    }

    pub fn fetch(&self, id: &HostelId) -> Result<Option<Hostel>, AppError> {
        Ok(self.hostels.fetch(id)?)
    }

    pub fn list(&self) -> Result<Vec<Hostel>, AppError> {
        Ok(self.hostels.list()?)
    }
}
