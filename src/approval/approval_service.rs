use std::collections::BTreeMap;
use std::sync::Arc;

use diesel::SqliteConnection;
use log::{error, info, warn};
use serde::Serialize;

use crate::championship::ChampionshipService;
use crate::db::{DbPool, DbTransactionExecutor};
use crate::equipment::{EligibilityService, EquipmentMismatch, EquipmentVerdict};
use crate::errors::{Error, Result, ValidationError};
use crate::records::RecordsService;
use crate::rounds::RoundsRepository;
use crate::scores::scores_model::{NewArrowRow, NewScoreRow};
use crate::scores::{Score, ScoresRepository};
use crate::scoring::score_value;
use crate::staging::{StagedArrow, StagingRepository};

/// What approving a staged score produced.
///
/// An equipment mismatch is a normal outcome, not an error: nothing is
/// written, the staged score stays pending, and the recorder decides
/// whether to override.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApprovalOutcome {
    #[serde(rename_all = "camelCase")]
    Approved { score_id: i32 },
    EquipmentMismatch(EquipmentMismatch),
}

/// The approval pipeline. Moves a staged score onto the official record
/// in a single transaction: score row, end/arrow detail, record updates
/// and staging cleanup all commit or roll back together.
pub struct ApprovalService {
    pool: Arc<DbPool>,
    staging: StagingRepository,
    scores: ScoresRepository,
    rounds: RoundsRepository,
    eligibility: EligibilityService,
    records: RecordsService,
    championship: ChampionshipService,
}

impl ApprovalService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ApprovalService {
            staging: StagingRepository::new(),
            scores: ScoresRepository::new(),
            rounds: RoundsRepository::new(),
            eligibility: EligibilityService::new(pool.clone()),
            records: RecordsService::new(pool.clone()),
            championship: ChampionshipService::new(pool.clone()),
            pool,
        }
    }

    /// Approves a staged score.
    ///
    /// The final total is the override if given, else the declared total,
    /// else zero; totals are never recomputed from arrow detail. After
    /// the transaction commits, the championship trigger runs on its own;
    /// its failure is logged and never un-approves the score.
    pub fn approve(
        &self,
        staging_id: i32,
        total_override: Option<i32>,
        validate_equipment: bool,
    ) -> Result<ApprovalOutcome> {
        let (outcome, competition_id) = self.pool.execute(|conn| {
            let staged = self.staging.get_with_arrows(conn, staging_id)?;

            if validate_equipment {
                let verdict = self.eligibility.check_with_conn(
                    conn,
                    staged.staged.archer_id,
                    staged.staged.equipment_id,
                )?;
                match verdict {
                    EquipmentVerdict::Valid(approval) => {
                        if let Some(warning) = &approval.warning {
                            warn!("Approving staged score {}: {}", staging_id, warning);
                        }
                    }
                    EquipmentVerdict::Mismatch(mismatch) => {
                        return Ok((ApprovalOutcome::EquipmentMismatch(mismatch), None));
                    }
                    EquipmentVerdict::Unknown { reason } => {
                        return Err(Error::NotFound(reason));
                    }
                }
            }

            let total = total_override.or(staged.staged.declared_total).unwrap_or(0);

            let score = self.scores.insert_score(
                conn,
                NewScoreRow {
                    archer_id: staged.staged.archer_id,
                    round_id: staged.staged.round_id,
                    equipment_id: staged.staged.equipment_id,
                    competition_id: staged.staged.competition_id,
                    shot_date: staged.staged.shot_date,
                    total,
                    is_approved: true,
                    is_practice: staged.staged.is_practice,
                },
            )?;

            self.materialize_ends(conn, &score, &staged.arrows)?;

            self.records.update_personal_best(conn, &score)?;
            self.records.update_club_best(conn, &score)?;

            self.staging.delete_arrows(conn, staging_id)?;
            self.staging.delete_staged(conn, staging_id)?;

            Ok((
                ApprovalOutcome::Approved { score_id: score.id },
                staged.staged.competition_id,
            ))
        })?;

        match &outcome {
            ApprovalOutcome::Approved { score_id } => {
                info!("Approved staged score {} as score {}", staging_id, score_id);
                if let Some(competition_id) = competition_id {
                    if let Err(e) = self.championship.on_score_approved(competition_id) {
                        error!(
                            "Standings recompute after approving score {} failed: {}",
                            score_id, e
                        );
                    }
                }
            }
            ApprovalOutcome::EquipmentMismatch(mismatch) => {
                info!(
                    "Approval of staged score {} stopped by the equipment gate: {}",
                    staging_id, mismatch.reason
                );
            }
        }

        Ok(outcome)
    }

    /// Approves with the equipment gate disabled and an explicit total.
    /// The override reason goes to the operational log only, never into
    /// the score row.
    pub fn override_and_approve(&self, staging_id: i32, total: i32, reason: &str) -> Result<i32> {
        if total < 0 {
            return Err(ValidationError::InvalidInput(format!(
                "override total must not be negative, got {}",
                total
            ))
            .into());
        }

        info!(
            "Equipment override for staged score {}: {}",
            staging_id, reason
        );

        match self.approve(staging_id, Some(total), false)? {
            ApprovalOutcome::Approved { score_id } => Ok(score_id),
            ApprovalOutcome::EquipmentMismatch(mismatch) => Err(ValidationError::InvalidInput(
                format!("equipment mismatch reported with validation disabled: {}", mismatch.reason),
            )
            .into()),
        }
    }

    /// Discards a staged score and its arrows in one transaction.
    pub fn reject(&self, staging_id: i32, reason: &str) -> Result<()> {
        self.pool.execute(|conn| {
            self.staging.delete_arrows(conn, staging_id)?;
            let deleted = self.staging.delete_staged(conn, staging_id)?;
            if deleted == 0 {
                return Err(Error::NotFound(format!(
                    "Staged score with id {} not found",
                    staging_id
                )));
            }
            Ok(())
        })?;

        info!("Rejected staged score {}: {}", staging_id, reason);
        Ok(())
    }

    /// Turns staged arrow rows into end and arrow rows.
    ///
    /// Staged arrows group by (range index, end number); each group
    /// becomes one end against the resolved range. A range index with no
    /// match in the round fails the whole approval.
    fn materialize_ends(
        &self,
        conn: &mut SqliteConnection,
        score: &Score,
        staged_arrows: &[StagedArrow],
    ) -> Result<()> {
        if staged_arrows.is_empty() {
            return Ok(());
        }

        let mut groups: BTreeMap<(i32, i32), Vec<&StagedArrow>> = BTreeMap::new();
        for arrow in staged_arrows {
            groups
                .entry((arrow.range_index, arrow.end_number))
                .or_default()
                .push(arrow);
        }

        let mut resolved_ranges: BTreeMap<i32, i32> = BTreeMap::new();
        for ((range_index, end_number), group) in groups {
            let round_range_id = match resolved_ranges.get(&range_index) {
                Some(id) => *id,
                None => {
                    let range = self
                        .rounds
                        .find_range(conn, score.round_id, range_index)?
                        .ok_or_else(|| {
                            Error::NotFound(format!(
                                "Range {} not found for round {}",
                                range_index, score.round_id
                            ))
                        })?;
                    resolved_ranges.insert(range_index, range.id);
                    range.id
                }
            };

            let end = self
                .scores
                .insert_end(conn, score.id, round_range_id, end_number)?;
            let rows: Vec<NewArrowRow> = group
                .iter()
                .map(|a| NewArrowRow {
                    end_id: end.id,
                    arrow_number: a.arrow_number,
                    value: score_value(&a.token),
                })
                .collect();
            self.scores.insert_arrows(conn, &rows)?;
        }

        Ok(())
    }
}
