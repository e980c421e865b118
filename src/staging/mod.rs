pub(crate) mod staging_model;
pub(crate) mod staging_repository;
pub(crate) mod staging_service;

pub use staging_model::{
    NewStagedArrow, NewStagedScore, StagedArrow, StagedScore, StagedScoreWithArrows,
};
pub use staging_repository::StagingRepository;
pub use staging_service::StagingService;
