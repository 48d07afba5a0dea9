//! The room allocation ledger: per-room capacity, occupant list, and dense
//! bed numbering. Occupancy changes only through [`Room::assign`] and
//! [`Room::release`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LedgerError, Occupant, Room, RoomDraft, RoomId, RoomView};
pub use repository::{RoomFilter, RoomRepository};
pub use service::RoomService;
