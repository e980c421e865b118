use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// An approved score on the official record.
///
/// Immutable once created, except for the two best flags, which only the
/// records engine flips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: i32,
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub total: i32,
    pub is_approved: bool,
    pub is_practice: bool,
    pub is_personal_best: bool,
    pub is_club_best: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for scores
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::scores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScoreDB {
    pub id: i32,
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub total: i32,
    pub is_approved: bool,
    pub is_practice: bool,
    pub is_personal_best: bool,
    pub is_club_best: bool,
    pub created_at: NaiveDateTime,
}

impl From<ScoreDB> for Score {
    fn from(db: ScoreDB) -> Self {
        Self {
            id: db.id,
            archer_id: db.archer_id,
            round_id: db.round_id,
            equipment_id: db.equipment_id,
            competition_id: db.competition_id,
            shot_date: db.shot_date,
            total: db.total,
            is_approved: db.is_approved,
            is_practice: db.is_practice,
            is_personal_best: db.is_personal_best,
            is_club_best: db.is_club_best,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::scores)]
pub(crate) struct NewScoreRow {
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub total: i32,
    pub is_approved: bool,
    pub is_practice: bool,
}

/// One end of a score, tied to the range it was shot on.
#[derive(Queryable, Selectable, Identifiable, Serialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::ends)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct End {
    pub id: i32,
    pub score_id: i32,
    pub round_range_id: i32,
    pub end_number: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::ends)]
pub(crate) struct NewEndRow {
    pub score_id: i32,
    pub round_range_id: i32,
    pub end_number: i32,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::arrows)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub id: i32,
    pub end_id: i32,
    pub arrow_number: i32,
    pub value: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::arrows)]
pub(crate) struct NewArrowRow {
    pub end_id: i32,
    pub arrow_number: i32,
    pub value: i32,
}

/// One approved competition result with the fields the standings and
/// results queries group by.
#[derive(Queryable, PartialEq, Debug, Clone)]
pub struct CompetitionScoreRow {
    pub score_id: i32,
    pub archer_id: i32,
    pub archer_name: String,
    pub class_id: i32,
    pub class_name: String,
    pub division_id: i32,
    pub division_name: String,
    pub total: i32,
}
