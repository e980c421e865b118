use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A round definition: a named arrangement of ranges shot in order.
///
/// Definitions can be superseded over time; a score always references the
/// definition that was effective on its shot date.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::rounds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: i32,
    pub name: String,
    pub total_arrows: i32,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

impl Round {
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.map_or(true, |to| date <= to)
    }
}

/// One range of a round, addressed by its 1-based position.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::round_ranges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct RoundRange {
    pub id: i32,
    pub round_id: i32,
    pub range_index: i32,
    pub distance_metres: i32,
    pub face_size_cm: i32,
    pub num_ends: i32,
    pub arrows_per_end: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundWithRanges {
    #[serde(flatten)]
    pub round: Round,
    pub ranges: Vec<RoundRange>,
}

/// Input model for defining a round together with its ranges.
///
/// The total arrow count is derived from the ranges, not supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRound {
    pub name: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub ranges: Vec<NewRoundRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoundRange {
    pub range_index: i32,
    pub distance_metres: i32,
    pub face_size_cm: i32,
    pub num_ends: i32,
    pub arrows_per_end: i32,
}

impl NewRound {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if let Some(to) = self.effective_to {
            if to < self.effective_from {
                return Err(ValidationError::InvalidDateRange(format!(
                    "effective_to {} precedes effective_from {}",
                    to, self.effective_from
                ))
                .into());
            }
        }
        if self.ranges.is_empty() {
            return Err(ValidationError::MissingField("ranges".to_string()).into());
        }
        let mut seen = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            range.validate()?;
            if seen.contains(&range.range_index) {
                return Err(ValidationError::InvalidInput(format!(
                    "duplicate range index {}",
                    range.range_index
                ))
                .into());
            }
            seen.push(range.range_index);
        }
        Ok(())
    }

    pub fn total_arrows(&self) -> i32 {
        self.ranges
            .iter()
            .map(|r| r.num_ends * r.arrows_per_end)
            .sum()
    }
}

impl NewRoundRange {
    pub fn validate(&self) -> Result<()> {
        if self.range_index <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "range index must be positive, got {}",
                self.range_index
            ))
            .into());
        }
        for (field, value) in [
            ("distanceMetres", self.distance_metres),
            ("faceSizeCm", self.face_size_cm),
            ("numEnds", self.num_ends),
            ("arrowsPerEnd", self.arrows_per_end),
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

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::rounds)]
pub(crate) struct NewRoundRow {
    pub name: String,
    pub total_arrows: i32,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::round_ranges)]
pub(crate) struct NewRoundRangeRow {
    pub round_id: i32,
    pub range_index: i32,
    pub distance_metres: i32,
    pub face_size_cm: i32,
    pub num_ends: i32,
    pub arrows_per_end: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indoor_round() -> NewRound {
        NewRound {
            name: "Portsmouth".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            effective_to: None,
            ranges: vec![NewRoundRange {
                range_index: 1,
                distance_metres: 18,
                face_size_cm: 60,
                num_ends: 20,
                arrows_per_end: 3,
            }],
        }
    }

    #[test]
    fn test_total_arrows_derived_from_ranges() {
        let mut round = indoor_round();
        assert_eq!(round.total_arrows(), 60);

        round.ranges.push(NewRoundRange {
            range_index: 2,
            distance_metres: 25,
            face_size_cm: 60,
            num_ends: 10,
            arrows_per_end: 3,
        });
        assert_eq!(round.total_arrows(), 90);
    }

    #[test]
    fn test_validate_rejects_duplicate_range_index() {
        let mut round = indoor_round();
        round.ranges.push(NewRoundRange {
            range_index: 1,
            distance_metres: 25,
            face_size_cm: 60,
            num_ends: 10,
            arrows_per_end: 3,
        });
        assert!(round.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_effective_window() {
        let mut round = indoor_round();
        round.effective_to = NaiveDate::from_ymd_opt(2019, 12, 31);
        assert!(round.validate().is_err());
    }

    #[test]
    fn test_is_effective_on_respects_window() {
        let round = Round {
            id: 1,
            name: "Portsmouth".to_string(),
            total_arrows: 60,
            effective_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            effective_to: NaiveDate::from_ymd_opt(2022, 12, 31),
        };

        assert!(round.is_effective_on(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
        assert!(round.is_effective_on(NaiveDate::from_ymd_opt(2021, 6, 15).unwrap()));
        assert!(round.is_effective_on(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()));
        assert!(!round.is_effective_on(NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()));
        assert!(!round.is_effective_on(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()));
    }

    #[test]
    fn test_is_effective_on_open_ended() {
        let round = Round {
            id: 1,
            name: "Portsmouth".to_string(),
            total_arrows: 60,
            effective_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            effective_to: None,
        };

        assert!(round.is_effective_on(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
        assert!(!round.is_effective_on(NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()));
    }
}
