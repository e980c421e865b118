use std::sync::Arc;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;

use super::equipment_model::{Division, Equipment, NewEquipment};
use super::equipment_repository::EquipmentRepository;

/// Service for division and equipment reference data.
pub struct EquipmentService {
    pool: Arc<DbPool>,
    repository: EquipmentRepository,
}

impl EquipmentService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        EquipmentService {
            pool,
            repository: EquipmentRepository::new(),
        }
    }

    pub fn create_division(&self, name: &str) -> Result<Division> {
        self.pool
            .execute(|conn| self.repository.create_division(conn, name))
    }

    pub fn list_divisions(&self) -> Result<Vec<Division>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.list_divisions(&mut conn)
    }

    pub fn create_equipment(&self, new_equipment: NewEquipment) -> Result<Equipment> {
        self.pool
            .execute(|conn| self.repository.create_equipment(conn, new_equipment))
    }

    pub fn get_equipment(&self, equipment_id: i32) -> Result<Equipment> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.get_equipment(&mut conn, equipment_id)
    }

    pub fn list_equipment(&self) -> Result<Vec<Equipment>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.list_equipment(&mut conn)
    }
}
