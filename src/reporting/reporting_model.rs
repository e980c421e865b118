use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::competitions::Competition;

/// Filters for an archer's score history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFilters {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub round_id: Option<i32>,
}

/// One row of an archer's score history, display names joined in.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub score_id: i32,
    pub archer_id: i32,
    pub archer_name: String,
    pub round_id: i32,
    pub round_name: String,
    pub equipment_name: String,
    pub competition_name: Option<String>,
    pub shot_date: NaiveDate,
    pub total: i32,
    pub is_practice: bool,
    pub is_personal_best: bool,
    pub is_club_best: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndDetail {
    pub range_index: i32,
    pub distance_metres: i32,
    pub end_number: i32,
    /// Arrow values, highest first.
    pub arrows: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    #[serde(flatten)]
    pub summary: ScoreSummary,
    pub ends: Vec<EndDetail>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResultEntry {
    /// Placement within the category. An archer's scores beyond their
    /// best carry no placement.
    pub placement: Option<i32>,
    pub archer_id: i32,
    pub archer_name: String,
    pub score_id: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionCategoryResults {
    pub category_name: String,
    pub entries: Vec<CompetitionResultEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResults {
    pub competition: Competition,
    pub categories: Vec<CompetitionCategoryResults>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalBestView {
    pub round_id: i32,
    pub round_name: String,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub score_id: i32,
    pub total: i32,
    pub achieved_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClubBestView {
    pub category_id: i32,
    pub category_name: String,
    pub round_id: i32,
    pub round_name: String,
    pub score_id: i32,
    pub archer_id: i32,
    pub archer_name: String,
    pub total: i32,
    pub achieved_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub rank: i32,
    pub archer_id: i32,
    pub archer_name: String,
    pub points: i32,
    pub competitions_attended: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStandings {
    pub category_id: i32,
    pub category_name: String,
    pub entries: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArcherChampionshipSummary {
    pub season_year: i32,
    pub category_id: i32,
    pub category_name: String,
    pub rank: i32,
    pub points: i32,
    pub competitions_attended: i32,
}
