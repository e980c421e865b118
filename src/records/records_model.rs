use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;

/// What a record check did with the candidate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// First score ever recorded for the key.
    Created,
    /// Strictly better than the incumbent; the pointer moved.
    Updated,
    /// Not better. Equal totals keep the incumbent.
    Unchanged,
}

/// Pointer to an archer's current best score for a (round, equipment) key.
#[derive(Queryable, Selectable, Identifiable, Serialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::personal_bests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PersonalBest {
    pub id: i32,
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub score_id: i32,
    pub achieved_on: NaiveDate,
    pub updated_at: NaiveDateTime,
}

/// Pointer to the club's current best score for a (category, round) key.
#[derive(Queryable, Selectable, Identifiable, Serialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::club_bests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ClubBest {
    pub id: i32,
    pub category_id: i32,
    pub round_id: i32,
    pub score_id: i32,
    pub achieved_on: NaiveDate,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::personal_bests)]
pub(crate) struct NewPersonalBestRow {
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub score_id: i32,
    pub achieved_on: NaiveDate,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::club_bests)]
pub(crate) struct NewClubBestRow {
    pub category_id: i32,
    pub round_id: i32,
    pub score_id: i32,
    pub achieved_on: NaiveDate,
}
