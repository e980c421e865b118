use chrono::{Datelike, NaiveDate};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::competitions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub is_official: bool,
    pub is_championship: bool,
    pub contributes_to_championship: bool,
}

impl Competition {
    /// The championship season a competition belongs to is the calendar
    /// year of its start date.
    pub fn season_year(&self) -> i32 {
        self.start_date.year()
    }
}

/// Input model for creating a competition
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::competitions)]
#[serde(rename_all = "camelCase")]
pub struct NewCompetition {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub is_official: bool,
    pub is_championship: bool,
    pub contributes_to_championship: bool,
}

impl NewCompetition {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::InvalidDateRange(format!(
                "end_date {} precedes start_date {}",
                self.end_date, self.start_date
            ))
            .into());
        }
        Ok(())
    }
}
