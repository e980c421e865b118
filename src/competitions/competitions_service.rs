use std::sync::Arc;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;

use super::competitions_model::{Competition, NewCompetition};
use super::competitions_repository::CompetitionsRepository;

/// Service for competition reference data.
pub struct CompetitionsService {
    pool: Arc<DbPool>,
    repository: CompetitionsRepository,
}

impl CompetitionsService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CompetitionsService {
            pool,
            repository: CompetitionsRepository::new(),
        }
    }

    pub fn create_competition(&self, new_competition: NewCompetition) -> Result<Competition> {
        self.pool
            .execute(|conn| self.repository.create(conn, new_competition))
    }

    pub fn get_competition(&self, competition_id: i32) -> Result<Competition> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.get(&mut conn, competition_id)
    }

    pub fn list_competitions(&self) -> Result<Vec<Competition>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.list(&mut conn)
    }
}
