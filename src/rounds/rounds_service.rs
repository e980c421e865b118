use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;

use super::rounds_model::{NewRound, Round, RoundWithRanges};
use super::rounds_repository::RoundsRepository;

/// Service for round definitions.
pub struct RoundsService {
    pool: Arc<DbPool>,
    repository: RoundsRepository,
}

impl RoundsService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RoundsService {
            pool,
            repository: RoundsRepository::new(),
        }
    }

    pub fn create_round(&self, new_round: NewRound) -> Result<RoundWithRanges> {
        debug!("Defining round: {}", new_round.name);
        self.pool
            .execute(|conn| self.repository.create(conn, new_round))
    }

    pub fn get_round(&self, round_id: i32) -> Result<RoundWithRanges> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.get_with_ranges(&mut conn, round_id)
    }

    pub fn find_round_effective_on(&self, name: &str, date: NaiveDate) -> Result<Option<Round>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.find_by_name_effective_on(&mut conn, name, date)
    }

    pub fn list_rounds(&self) -> Result<Vec<Round>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.list(&mut conn)
    }
}
