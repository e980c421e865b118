pub(crate) mod championship_model;
pub(crate) mod championship_repository;
pub(crate) mod championship_service;

pub use championship_model::ChampionshipStanding;
pub use championship_repository::ChampionshipRepository;
pub use championship_service::ChampionshipService;
