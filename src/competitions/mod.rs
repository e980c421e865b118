pub(crate) mod competitions_model;
pub(crate) mod competitions_repository;
pub(crate) mod competitions_service;

pub use competitions_model::{Competition, NewCompetition};
pub use competitions_repository::CompetitionsRepository;
pub use competitions_service::CompetitionsService;
