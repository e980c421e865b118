use std::sync::Arc;

use log::debug;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;

use super::archers_model::{Archer, ArcherUpdate, NewArcher};
use super::archers_repository::ArcherRepository;

/// Service to handle archer registration and membership state.
pub struct ArcherService {
    pool: Arc<DbPool>,
    repository: ArcherRepository,
}

impl ArcherService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ArcherService {
            pool,
            repository: ArcherRepository::new(),
        }
    }

    pub fn create_archer(&self, new_archer: NewArcher) -> Result<Archer> {
        debug!("Registering archer: {}", new_archer.name);
        self.pool
            .execute(|conn| self.repository.create(conn, new_archer))
    }

    pub fn update_archer(&self, update: ArcherUpdate) -> Result<Archer> {
        debug!("Updating archer {}", update.id);
        self.pool
            .execute(|conn| self.repository.update(conn, update))
    }

    /// Marks an archer inactive. Their historical scores are untouched.
    pub fn deactivate_archer(&self, archer_id: i32) -> Result<()> {
        self.pool
            .execute(|conn| self.repository.set_active(conn, archer_id, false))
    }

    pub fn reactivate_archer(&self, archer_id: i32) -> Result<()> {
        self.pool
            .execute(|conn| self.repository.set_active(conn, archer_id, true))
    }

    pub fn get_archer(&self, archer_id: i32) -> Result<Archer> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.get(&mut conn, archer_id)
    }

    pub fn list_archers(&self, is_active_filter: Option<bool>) -> Result<Vec<Archer>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.list(&mut conn, is_active_filter)
    }
}
