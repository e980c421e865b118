use chrono::{NaiveDate, Utc};
use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::{club_bests, personal_bests};

use super::records_model::{ClubBest, NewClubBestRow, NewPersonalBestRow, PersonalBest};

/// Repository for the best-score pointer tables.
pub struct RecordsRepository;

impl RecordsRepository {
    pub fn new() -> Self {
        RecordsRepository
    }

    pub fn find_personal_best(
        &self,
        conn: &mut SqliteConnection,
        archer_id: i32,
        round_id: i32,
        equipment_id: i32,
    ) -> Result<Option<PersonalBest>> {
        personal_bests::table
            .filter(personal_bests::archer_id.eq(archer_id))
            .filter(personal_bests::round_id.eq(round_id))
            .filter(personal_bests::equipment_id.eq(equipment_id))
            .select(PersonalBest::as_select())
            .first::<PersonalBest>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn insert_personal_best(
        &self,
        conn: &mut SqliteConnection,
        archer_id: i32,
        round_id: i32,
        equipment_id: i32,
        score_id: i32,
        achieved_on: NaiveDate,
    ) -> Result<PersonalBest> {
        diesel::insert_into(personal_bests::table)
            .values(&NewPersonalBestRow {
                archer_id,
                round_id,
                equipment_id,
                score_id,
                achieved_on,
            })
            .returning(PersonalBest::as_returning())
            .get_result::<PersonalBest>(conn)
            .map_err(Error::from)
    }

    /// Moves an existing pointer to a new score.
    pub fn repoint_personal_best(
        &self,
        conn: &mut SqliteConnection,
        personal_best_id: i32,
        score_id: i32,
        achieved_on: NaiveDate,
    ) -> Result<()> {
        diesel::update(personal_bests::table.find(personal_best_id))
            .set((
                personal_bests::score_id.eq(score_id),
                personal_bests::achieved_on.eq(achieved_on),
                personal_bests::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn personal_bests_for_archer(
        &self,
        conn: &mut SqliteConnection,
        archer_id: i32,
    ) -> Result<Vec<PersonalBest>> {
        personal_bests::table
            .filter(personal_bests::archer_id.eq(archer_id))
            .order((personal_bests::round_id.asc(), personal_bests::equipment_id.asc()))
            .select(PersonalBest::as_select())
            .load::<PersonalBest>(conn)
            .map_err(Error::from)
    }

    pub fn find_club_best(
        &self,
        conn: &mut SqliteConnection,
        category_id: i32,
        round_id: i32,
    ) -> Result<Option<ClubBest>> {
        club_bests::table
            .filter(club_bests::category_id.eq(category_id))
            .filter(club_bests::round_id.eq(round_id))
            .select(ClubBest::as_select())
            .first::<ClubBest>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn insert_club_best(
        &self,
        conn: &mut SqliteConnection,
        category_id: i32,
        round_id: i32,
        score_id: i32,
        achieved_on: NaiveDate,
    ) -> Result<ClubBest> {
        diesel::insert_into(club_bests::table)
            .values(&NewClubBestRow {
                category_id,
                round_id,
                score_id,
                achieved_on,
            })
            .returning(ClubBest::as_returning())
            .get_result::<ClubBest>(conn)
            .map_err(Error::from)
    }

    pub fn repoint_club_best(
        &self,
        conn: &mut SqliteConnection,
        club_best_id: i32,
        score_id: i32,
        achieved_on: NaiveDate,
    ) -> Result<()> {
        diesel::update(club_bests::table.find(club_best_id))
            .set((
                club_bests::score_id.eq(score_id),
                club_bests::achieved_on.eq(achieved_on),
                club_bests::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn list_club_bests(
        &self,
        conn: &mut SqliteConnection,
        category_id: Option<i32>,
    ) -> Result<Vec<ClubBest>> {
        let mut query = club_bests::table.into_boxed();
        if let Some(category_id) = category_id {
            query = query.filter(club_bests::category_id.eq(category_id));
        }
        query
            .order((club_bests::category_id.asc(), club_bests::round_id.asc()))
            .select(ClubBest::as_select())
            .load::<ClubBest>(conn)
            .map_err(Error::from)
    }
}

impl Default for RecordsRepository {
    fn default() -> Self {
        Self::new()
    }
}
