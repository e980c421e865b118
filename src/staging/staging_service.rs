use std::sync::Arc;

use log::debug;

use crate::archers::ArcherRepository;
use crate::competitions::CompetitionsRepository;
use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::equipment::EquipmentRepository;
use crate::errors::{Result, ValidationError};
use crate::rounds::RoundsRepository;

use super::staging_model::{NewStagedScore, StagedScore, StagedScoreWithArrows};
use super::staging_repository::StagingRepository;

/// Service for submitting scores into the review queue.
pub struct StagingService {
    pool: Arc<DbPool>,
    repository: StagingRepository,
    archers: ArcherRepository,
    rounds: RoundsRepository,
    equipment: EquipmentRepository,
    competitions: CompetitionsRepository,
}

impl StagingService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        StagingService {
            pool,
            repository: StagingRepository::new(),
            archers: ArcherRepository::new(),
            rounds: RoundsRepository::new(),
            equipment: EquipmentRepository::new(),
            competitions: CompetitionsRepository::new(),
        }
    }

    /// Validates the submission and stores it, returning the staging id.
    ///
    /// Range indexes in the arrow detail are deliberately not resolved
    /// here; resolution happens at approval time, inside the approval
    /// transaction.
    pub fn stage_score(&self, submission: NewStagedScore) -> Result<i32> {
        submission.validate()?;

        let staged = self.pool.execute(|conn| {
            let archer = self.archers.get(conn, submission.archer_id)?;
            if !archer.is_active {
                return Err(ValidationError::InvalidInput(format!(
                    "archer '{}' is inactive and cannot submit scores",
                    archer.name
                ))
                .into());
            }

            let round = self.rounds.get(conn, submission.round_id)?;
            if !round.is_effective_on(submission.shot_date) {
                return Err(ValidationError::InvalidDateRange(format!(
                    "round '{}' is not effective on {}",
                    round.name, submission.shot_date
                ))
                .into());
            }

            self.equipment.get_equipment(conn, submission.equipment_id)?;
            if let Some(competition_id) = submission.competition_id {
                self.competitions.get(conn, competition_id)?;
            }

            self.repository.insert(conn, &submission)
        })?;

        debug!(
            "Staged score {} for archer {} ({} arrows)",
            staged.id,
            staged.archer_id,
            submission.arrows.len()
        );
        Ok(staged.id)
    }

    pub fn get(&self, staging_id: i32) -> Result<StagedScoreWithArrows> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.get_with_arrows(&mut conn, staging_id)
    }

    pub fn pending(&self) -> Result<Vec<StagedScore>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.pending(&mut conn)
    }

    pub fn pending_for_archer(&self, archer_id: i32) -> Result<Vec<StagedScore>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.pending_for_archer(&mut conn, archer_id)
    }
}
