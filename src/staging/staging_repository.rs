use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::{staged_arrows, staged_scores};

use super::staging_model::{
    NewStagedArrowRow, NewStagedScore, NewStagedScoreRow, StagedArrow, StagedScore, StagedScoreDB,
    StagedScoreWithArrows,
};

/// Repository for the staging store.
pub struct StagingRepository;

impl StagingRepository {
    pub fn new() -> Self {
        StagingRepository
    }

    /// Inserts the staged score and its arrow detail. The caller supplies
    /// the enclosing transaction.
    pub fn insert(
        &self,
        conn: &mut SqliteConnection,
        submission: &NewStagedScore,
    ) -> Result<StagedScore> {
        let staged = diesel::insert_into(staged_scores::table)
            .values(&NewStagedScoreRow {
                archer_id: submission.archer_id,
                round_id: submission.round_id,
                equipment_id: submission.equipment_id,
                competition_id: submission.competition_id,
                shot_date: submission.shot_date,
                shot_time: submission.shot_time,
                is_practice: submission.is_practice,
                declared_total: submission.declared_total,
            })
            .returning(StagedScoreDB::as_returning())
            .get_result::<StagedScoreDB>(conn)?;

        if !submission.arrows.is_empty() {
            let rows: Vec<NewStagedArrowRow> = submission
                .arrows
                .iter()
                .map(|a| NewStagedArrowRow {
                    staged_score_id: staged.id,
                    range_index: a.range_index,
                    distance_metres: a.distance_metres,
                    face_size_cm: a.face_size_cm,
                    end_number: a.end_number,
                    arrow_number: a.arrow_number,
                    token: a.token.clone(),
                })
                .collect();

            diesel::insert_into(staged_arrows::table)
                .values(&rows)
                .execute(conn)?;
        }

        Ok(staged.into())
    }

    pub fn find(&self, conn: &mut SqliteConnection, staging_id: i32) -> Result<Option<StagedScore>> {
        staged_scores::table
            .find(staging_id)
            .select(StagedScoreDB::as_select())
            .first::<StagedScoreDB>(conn)
            .optional()
            .map(|row| row.map(StagedScore::from))
            .map_err(Error::from)
    }

    pub fn get_with_arrows(
        &self,
        conn: &mut SqliteConnection,
        staging_id: i32,
    ) -> Result<StagedScoreWithArrows> {
        let staged = self.find(conn, staging_id)?.ok_or_else(|| {
            Error::NotFound(format!("Staged score with id {} not found", staging_id))
        })?;
        let arrows = self.arrows_for(conn, staging_id)?;
        Ok(StagedScoreWithArrows { staged, arrows })
    }

    pub fn arrows_for(
        &self,
        conn: &mut SqliteConnection,
        staging_id: i32,
    ) -> Result<Vec<StagedArrow>> {
        staged_arrows::table
            .filter(staged_arrows::staged_score_id.eq(staging_id))
            .order((
                staged_arrows::range_index.asc(),
                staged_arrows::end_number.asc(),
                staged_arrows::arrow_number.asc(),
                staged_arrows::id.asc(),
            ))
            .select(StagedArrow::as_select())
            .load::<StagedArrow>(conn)
            .map_err(Error::from)
    }

    /// The review queue, oldest submission first.
    pub fn pending(&self, conn: &mut SqliteConnection) -> Result<Vec<StagedScore>> {
        staged_scores::table
            .order((staged_scores::created_at.asc(), staged_scores::id.asc()))
            .select(StagedScoreDB::as_select())
            .load::<StagedScoreDB>(conn)
            .map(|rows| rows.into_iter().map(StagedScore::from).collect())
            .map_err(Error::from)
    }

    pub fn pending_for_archer(
        &self,
        conn: &mut SqliteConnection,
        archer_id: i32,
    ) -> Result<Vec<StagedScore>> {
        staged_scores::table
            .filter(staged_scores::archer_id.eq(archer_id))
            .order((staged_scores::created_at.asc(), staged_scores::id.asc()))
            .select(StagedScoreDB::as_select())
            .load::<StagedScoreDB>(conn)
            .map(|rows| rows.into_iter().map(StagedScore::from).collect())
            .map_err(Error::from)
    }

    pub fn delete_arrows(&self, conn: &mut SqliteConnection, staging_id: i32) -> Result<usize> {
        diesel::delete(staged_arrows::table.filter(staged_arrows::staged_score_id.eq(staging_id)))
            .execute(conn)
            .map_err(Error::from)
    }

    pub fn delete_staged(&self, conn: &mut SqliteConnection, staging_id: i32) -> Result<usize> {
        diesel::delete(staged_scores::table.find(staging_id))
            .execute(conn)
            .map_err(Error::from)
    }
}

impl Default for StagingRepository {
    fn default() -> Self {
        Self::new()
    }
}
