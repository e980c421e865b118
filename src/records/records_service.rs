use std::sync::Arc;

use log::debug;

use crate::archers::ArcherRepository;
use crate::categories::CategoriesRepository;
use crate::db::{DbPool, DbTransactionExecutor};
use crate::equipment::EquipmentRepository;
use crate::errors::{Error, Result};
use crate::scores::{Score, ScoresRepository};
use diesel::SqliteConnection;

use super::records_model::RecordOutcome;
use super::records_repository::RecordsRepository;

/// The records engine. Compares an approved score against the current
/// best pointers and moves them when the score is strictly better.
///
/// The comparison methods run on a caller-supplied connection so the
/// approval pipeline includes them in its transaction.
pub struct RecordsService {
    pool: Arc<DbPool>,
    repository: RecordsRepository,
    scores: ScoresRepository,
    archers: ArcherRepository,
    equipment: EquipmentRepository,
    categories: CategoriesRepository,
}

impl RecordsService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RecordsService {
            pool,
            repository: RecordsRepository::new(),
            scores: ScoresRepository::new(),
            archers: ArcherRepository::new(),
            equipment: EquipmentRepository::new(),
            categories: CategoriesRepository::new(),
        }
    }

    /// Personal best for the (archer, round, equipment) key.
    ///
    /// The incumbent total is re-fetched through its score row on this
    /// connection, not trusted from the pointer row.
    pub fn update_personal_best(
        &self,
        conn: &mut SqliteConnection,
        score: &Score,
    ) -> Result<RecordOutcome> {
        let current = self.repository.find_personal_best(
            conn,
            score.archer_id,
            score.round_id,
            score.equipment_id,
        )?;

        match current {
            None => {
                self.repository.insert_personal_best(
                    conn,
                    score.archer_id,
                    score.round_id,
                    score.equipment_id,
                    score.id,
                    score.shot_date,
                )?;
                self.scores.set_personal_best_flag(conn, score.id, true)?;
                debug!(
                    "First personal best for archer {} on round {}: score {}",
                    score.archer_id, score.round_id, score.id
                );
                Ok(RecordOutcome::Created)
            }
            Some(best) => {
                let incumbent = self.scores.get(conn, best.score_id)?;
                if score.total > incumbent.total {
                    self.scores.set_personal_best_flag(conn, incumbent.id, false)?;
                    self.repository
                        .repoint_personal_best(conn, best.id, score.id, score.shot_date)?;
                    self.scores.set_personal_best_flag(conn, score.id, true)?;
                    debug!(
                        "Personal best for archer {} on round {} moved from score {} ({}) to score {} ({})",
                        score.archer_id, score.round_id, incumbent.id, incumbent.total, score.id, score.total
                    );
                    Ok(RecordOutcome::Updated)
                } else {
                    Ok(RecordOutcome::Unchanged)
                }
            }
        }
    }

    /// Club best for the (category, round) key. The category derives from
    /// the archer's class and the division of the equipment the score was
    /// shot with, created on demand.
    pub fn update_club_best(
        &self,
        conn: &mut SqliteConnection,
        score: &Score,
    ) -> Result<RecordOutcome> {
        let archer = self.archers.get(conn, score.archer_id)?;
        let (_, division) = self
            .equipment
            .find_equipment_with_division(conn, score.equipment_id)?
            .ok_or_else(|| {
                Error::NotFound(format!("Equipment with id {} not found", score.equipment_id))
            })?;
        let category = self
            .categories
            .find_or_create(conn, archer.class_id, division.id)?;

        let current = self
            .repository
            .find_club_best(conn, category.id, score.round_id)?;

        match current {
            None => {
                self.repository.insert_club_best(
                    conn,
                    category.id,
                    score.round_id,
                    score.id,
                    score.shot_date,
                )?;
                self.scores.set_club_best_flag(conn, score.id, true)?;
                debug!(
                    "First club best for category '{}' on round {}: score {}",
                    category.name, score.round_id, score.id
                );
                Ok(RecordOutcome::Created)
            }
            Some(best) => {
                let incumbent = self.scores.get(conn, best.score_id)?;
                if score.total > incumbent.total {
                    self.scores.set_club_best_flag(conn, incumbent.id, false)?;
                    self.repository
                        .repoint_club_best(conn, best.id, score.id, score.shot_date)?;
                    self.scores.set_club_best_flag(conn, score.id, true)?;
                    debug!(
                        "Club best for category '{}' on round {} moved from score {} ({}) to score {} ({})",
                        category.name, score.round_id, incumbent.id, incumbent.total, score.id, score.total
                    );
                    Ok(RecordOutcome::Updated)
                } else {
                    Ok(RecordOutcome::Unchanged)
                }
            }
        }
    }

    /// Re-runs both record checks for an already approved score in a
    /// transaction of its own.
    pub fn refresh_for_score(&self, score_id: i32) -> Result<(RecordOutcome, RecordOutcome)> {
        self.pool.execute(|conn| {
            let score = self.scores.get(conn, score_id)?;
            let personal = self.update_personal_best(conn, &score)?;
            let club = self.update_club_best(conn, &score)?;
            Ok((personal, club))
        })
    }
}
