pub(crate) mod reporting_model;
pub(crate) mod reporting_service;

pub use reporting_model::{
    ArcherChampionshipSummary, CategoryStandings, ClubBestView, CompetitionCategoryResults,
    CompetitionResultEntry, CompetitionResults, EndDetail, PersonalBestView, ScoreDetail,
    ScoreFilters, ScoreSummary, StandingEntry,
};
pub use reporting_service::ReportingService;
