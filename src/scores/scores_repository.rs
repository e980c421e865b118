use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::{archers, arrows, classes, divisions, ends, equipment, scores};

use super::scores_model::{
    Arrow, CompetitionScoreRow, End, NewArrowRow, NewEndRow, NewScoreRow, Score, ScoreDB,
};

/// Repository for approved scores and their end/arrow detail.
pub struct ScoresRepository;

impl ScoresRepository {
    pub fn new() -> Self {
        ScoresRepository
    }

    pub fn insert_score(&self, conn: &mut SqliteConnection, row: NewScoreRow) -> Result<Score> {
        diesel::insert_into(scores::table)
            .values(&row)
            .returning(ScoreDB::as_returning())
            .get_result::<ScoreDB>(conn)
            .map(Score::from)
            .map_err(Error::from)
    }

    pub fn insert_end(
        &self,
        conn: &mut SqliteConnection,
        score_id: i32,
        round_range_id: i32,
        end_number: i32,
    ) -> Result<End> {
        diesel::insert_into(ends::table)
            .values(&NewEndRow {
                score_id,
                round_range_id,
                end_number,
            })
            .returning(End::as_returning())
            .get_result::<End>(conn)
            .map_err(Error::from)
    }

    pub fn insert_arrows(
        &self,
        conn: &mut SqliteConnection,
        rows: &[NewArrowRow],
    ) -> Result<usize> {
        diesel::insert_into(arrows::table)
            .values(rows)
            .execute(conn)
            .map_err(Error::from)
    }

    pub fn find(&self, conn: &mut SqliteConnection, score_id: i32) -> Result<Option<Score>> {
        scores::table
            .find(score_id)
            .select(ScoreDB::as_select())
            .first::<ScoreDB>(conn)
            .optional()
            .map(|row| row.map(Score::from))
            .map_err(Error::from)
    }

    pub fn get(&self, conn: &mut SqliteConnection, score_id: i32) -> Result<Score> {
        self.find(conn, score_id)?
            .ok_or_else(|| Error::NotFound(format!("Score with id {} not found", score_id)))
    }

    pub fn set_personal_best_flag(
        &self,
        conn: &mut SqliteConnection,
        score_id: i32,
        flag: bool,
    ) -> Result<()> {
        diesel::update(scores::table.find(score_id))
            .set(scores::is_personal_best.eq(flag))
            .execute(conn)?;
        Ok(())
    }

    pub fn set_club_best_flag(
        &self,
        conn: &mut SqliteConnection,
        score_id: i32,
        flag: bool,
    ) -> Result<()> {
        diesel::update(scores::table.find(score_id))
            .set(scores::is_club_best.eq(flag))
            .execute(conn)?;
        Ok(())
    }

    pub fn ends_for_score(&self, conn: &mut SqliteConnection, score_id: i32) -> Result<Vec<End>> {
        ends::table
            .filter(ends::score_id.eq(score_id))
            .order(ends::id.asc())
            .select(End::as_select())
            .load::<End>(conn)
            .map_err(Error::from)
    }

    pub fn arrows_for_end(&self, conn: &mut SqliteConnection, end_id: i32) -> Result<Vec<Arrow>> {
        arrows::table
            .filter(arrows::end_id.eq(end_id))
            .order(arrows::arrow_number.asc())
            .select(Arrow::as_select())
            .load::<Arrow>(conn)
            .map_err(Error::from)
    }

    /// Approved, non-practice results for a competition, best total first.
    /// Ties keep insertion order. Shared between the results view and the
    /// standings engine.
    pub fn competition_results(
        &self,
        conn: &mut SqliteConnection,
        competition_id: i32,
    ) -> Result<Vec<CompetitionScoreRow>> {
        scores::table
            .inner_join(archers::table.inner_join(classes::table))
            .inner_join(equipment::table.inner_join(divisions::table))
            .filter(scores::competition_id.eq(competition_id))
            .filter(scores::is_approved.eq(true))
            .filter(scores::is_practice.eq(false))
            .order((scores::total.desc(), scores::id.asc()))
            .select((
                scores::id,
                scores::archer_id,
                archers::name,
                archers::class_id,
                classes::name,
                equipment::division_id,
                divisions::name,
                scores::total,
            ))
            .load::<CompetitionScoreRow>(conn)
            .map_err(Error::from)
    }
}

impl Default for ScoresRepository {
    fn default() -> Self {
        Self::new()
    }
}
