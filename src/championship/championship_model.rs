use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

/// One archer's standing in a season's championship, within a category.
///
/// Standings rows for a season are regenerated wholesale whenever a
/// contributing competition's result set changes; they are never patched.
#[derive(Queryable, Selectable, Identifiable, Serialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::championship_standings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ChampionshipStanding {
    pub id: i32,
    pub season_year: i32,
    pub category_id: i32,
    pub archer_id: i32,
    pub points: i32,
    pub rank: i32,
    pub competitions_attended: i32,
    pub computed_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::championship_standings)]
pub(crate) struct NewStandingRow {
    pub season_year: i32,
    pub category_id: i32,
    pub archer_id: i32,
    pub points: i32,
    pub rank: i32,
    pub competitions_attended: i32,
}
