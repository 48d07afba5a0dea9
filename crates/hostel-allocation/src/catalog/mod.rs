//! Static hostel metadata: buildings, gender restrictions, room-type pricing.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Hostel, HostelForm, HostelId, RoomType};
pub use repository::HostelRepository;
pub use service::CatalogService;
