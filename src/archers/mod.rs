pub(crate) mod archers_model;
pub(crate) mod archers_repository;
pub(crate) mod archers_service;

pub use archers_model::{Archer, ArcherDB, ArcherUpdate, NewArcher};
pub use archers_repository::ArcherRepository;
pub use archers_service::ArcherService;
