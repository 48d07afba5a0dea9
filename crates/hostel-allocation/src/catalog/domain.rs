use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldError;
use crate::identity::Gender;

/// Identifier wrapper for hostel buildings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostelId(pub String);

impl HostelId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Shared,
    Premium,
}

impl RoomType {
    pub const fn label(self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Shared => "shared",
            RoomType::Premium => "premium",
        }
    }
}

/// A building. Read-mostly parent of many rooms; owns no occupancy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostel {
    pub id: HostelId,
    pub name: String,
    pub gender: Gender,
    /// Termly price per room type, in the smallest currency unit.
    pub prices: BTreeMap<RoomType, u32>,
    pub is_active: bool,
}

/// Admin payload for creating a hostel.
#[derive(Debug, Clone, Deserialize)]
pub struct HostelForm {
    pub name: String,
    pub gender: Gender,
    pub prices: BTreeMap<RoomType, u32>,
}

impl HostelForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "hostel name is required"));
        }
        if self.prices.is_empty() {
            errors.push(FieldError::new(
                "prices",
                "at least one room-type price is required",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
