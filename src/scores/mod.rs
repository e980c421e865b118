pub(crate) mod scores_model;
pub(crate) mod scores_repository;

pub use scores_model::{Arrow, CompetitionScoreRow, End, Score, ScoreDB};
pub use scores_repository::ScoresRepository;
