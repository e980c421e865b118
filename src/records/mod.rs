pub(crate) mod records_model;
pub(crate) mod records_repository;
pub(crate) mod records_service;

pub use records_model::{ClubBest, PersonalBest, RecordOutcome};
pub use records_repository::RecordsRepository;
pub use records_service::RecordsService;
