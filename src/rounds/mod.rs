pub(crate) mod rounds_model;
pub(crate) mod rounds_repository;
pub(crate) mod rounds_service;

pub use rounds_model::{NewRound, NewRoundRange, Round, RoundRange, RoundWithRanges};
pub use rounds_repository::RoundsRepository;
pub use rounds_service::RoundsService;
