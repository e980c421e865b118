use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A submitted score awaiting recorder review.
///
/// Staged rows are consumed exactly once, by approval or rejection; they
/// are never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StagedScore {
    pub id: i32,
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub shot_time: NaiveTime,
    pub is_practice: bool,
    pub declared_total: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Database model for staged scores
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::staged_scores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StagedScoreDB {
    pub id: i32,
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub shot_time: NaiveTime,
    pub is_practice: bool,
    pub declared_total: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// A single submitted arrow, still in raw token form.
#[derive(Queryable, Selectable, Identifiable, Serialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::staged_arrows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct StagedArrow {
    pub id: i32,
    pub staged_score_id: i32,
    pub range_index: i32,
    pub distance_metres: i32,
    pub face_size_cm: i32,
    pub end_number: i32,
    pub arrow_number: i32,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StagedScoreWithArrows {
    #[serde(flatten)]
    pub staged: StagedScore,
    pub arrows: Vec<StagedArrow>,
}

/// Input model for submitting a score for review.
///
/// Arrow detail is optional; a submission may carry only a declared total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStagedScore {
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub shot_time: NaiveTime,
    #[serde(default)]
    pub is_practice: bool,
    pub declared_total: Option<i32>,
    #[serde(default)]
    pub arrows: Vec<NewStagedArrow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStagedArrow {
    pub range_index: i32,
    pub distance_metres: i32,
    pub face_size_cm: i32,
    pub end_number: i32,
    pub arrow_number: i32,
    pub token: String,
}

impl NewStagedScore {
    pub fn validate(&self) -> Result<()> {
        for id in [self.archer_id, self.round_id, self.equipment_id] {
            if id <= 0 {
                return Err(ValidationError::NonPositiveId(id).into());
            }
        }
        if let Some(competition_id) = self.competition_id {
            if competition_id <= 0 {
                return Err(ValidationError::NonPositiveId(competition_id).into());
            }
        }
        if let Some(total) = self.declared_total {
            if total < 0 {
                return Err(ValidationError::InvalidInput(format!(
                    "declared total must not be negative, got {}",
                    total
                ))
                .into());
            }
        }
        for arrow in &self.arrows {
            arrow.validate()?;
        }
        Ok(())
    }
}

impl NewStagedArrow {
    /// Positional fields must be 1-based; the token itself is not
    /// validated here, unrecognised tokens score as a miss.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("rangeIndex", self.range_index),
            ("endNumber", self.end_number),
            ("arrowNumber", self.arrow_number),
            ("distanceMetres", self.distance_metres),
            ("faceSizeCm", self.face_size_cm),
        ] {
            if value <= 0 {
                return Err(ValidationError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    field, value
                ))
                .into());
            }
        }
        Ok(())
    }
}

impl From<StagedScoreDB> for StagedScore {
    fn from(db: StagedScoreDB) -> Self {
        Self {
            id: db.id,
            archer_id: db.archer_id,
            round_id: db.round_id,
            equipment_id: db.equipment_id,
            competition_id: db.competition_id,
            shot_date: db.shot_date,
            shot_time: db.shot_time,
            is_practice: db.is_practice,
            declared_total: db.declared_total,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::staged_scores)]
pub(crate) struct NewStagedScoreRow {
    pub archer_id: i32,
    pub round_id: i32,
    pub equipment_id: i32,
    pub competition_id: Option<i32>,
    pub shot_date: NaiveDate,
    pub shot_time: NaiveTime,
    pub is_practice: bool,
    pub declared_total: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::staged_arrows)]
pub(crate) struct NewStagedArrowRow {
    pub staged_score_id: i32,
    pub range_index: i32,
    pub distance_metres: i32,
    pub face_size_cm: i32,
    pub end_number: i32,
    pub arrow_number: i32,
    pub token: String,
}
