use chrono::NaiveDate;
use diesel::prelude::*;

use crate::errors::{Error, Result, ValidationError};
use crate::schema::competitions;

use super::competitions_model::{Competition, NewCompetition};

/// Repository for competition reference data.
pub struct CompetitionsRepository;

impl CompetitionsRepository {
    pub fn new() -> Self {
        CompetitionsRepository
    }

    pub fn create(
        &self,
        conn: &mut SqliteConnection,
        new_competition: NewCompetition,
    ) -> Result<Competition> {
        new_competition.validate()?;

        diesel::insert_into(competitions::table)
            .values(&new_competition)
            .returning(Competition::as_returning())
            .get_result::<Competition>(conn)
            .map_err(Error::from)
    }

    pub fn find(
        &self,
        conn: &mut SqliteConnection,
        competition_id: i32,
    ) -> Result<Option<Competition>> {
        competitions::table
            .find(competition_id)
            .select(Competition::as_select())
            .first::<Competition>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn get(&self, conn: &mut SqliteConnection, competition_id: i32) -> Result<Competition> {
        self.find(conn, competition_id)?.ok_or_else(|| {
            Error::NotFound(format!("Competition with id {} not found", competition_id))
        })
    }

    pub fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Competition>> {
        competitions::table
            .order(competitions::start_date.desc())
            .select(Competition::as_select())
            .load::<Competition>(conn)
            .map_err(Error::from)
    }

    /// Competitions that count toward the championship for a season,
    /// ordered by start date.
    pub fn contributing_in_year(
        &self,
        conn: &mut SqliteConnection,
        year: i32,
    ) -> Result<Vec<Competition>> {
        let season_start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ValidationError::InvalidInput(format!("invalid year {}", year)))?;
        let season_end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| ValidationError::InvalidInput(format!("invalid year {}", year)))?;

        competitions::table
            .filter(competitions::contributes_to_championship.eq(true))
            .filter(competitions::start_date.ge(season_start))
            .filter(competitions::start_date.le(season_end))
            .order((competitions::start_date.asc(), competitions::id.asc()))
            .select(Competition::as_select())
            .load::<Competition>(conn)
            .map_err(Error::from)
    }
}

impl Default for CompetitionsRepository {
    fn default() -> Self {
        Self::new()
    }
}
