use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::{divisions, equipment};

use super::equipment_model::{Division, Equipment, NewDivision, NewEquipment};

/// Repository for division and equipment reference data.
pub struct EquipmentRepository;

impl EquipmentRepository {
    pub fn new() -> Self {
        EquipmentRepository
    }

    pub fn create_division(&self, conn: &mut SqliteConnection, name: &str) -> Result<Division> {
        diesel::insert_into(divisions::table)
            .values(&NewDivision {
                name: name.to_string(),
            })
            .returning(Division::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn list_divisions(&self, conn: &mut SqliteConnection) -> Result<Vec<Division>> {
        divisions::table
            .select(Division::as_select())
            .order(divisions::name.asc())
            .load::<Division>(conn)
            .map_err(Error::from)
    }

    pub fn get_division(&self, conn: &mut SqliteConnection, division_id: i32) -> Result<Division> {
        divisions::table
            .find(division_id)
            .select(Division::as_select())
            .first::<Division>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Division with id {} not found", division_id)))
    }

    pub fn create_equipment(
        &self,
        conn: &mut SqliteConnection,
        new_equipment: NewEquipment,
    ) -> Result<Equipment> {
        diesel::insert_into(equipment::table)
            .values(&new_equipment)
            .returning(Equipment::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn find_equipment(
        &self,
        conn: &mut SqliteConnection,
        equipment_id: i32,
    ) -> Result<Option<Equipment>> {
        equipment::table
            .find(equipment_id)
            .select(Equipment::as_select())
            .first::<Equipment>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn get_equipment(
        &self,
        conn: &mut SqliteConnection,
        equipment_id: i32,
    ) -> Result<Equipment> {
        self.find_equipment(conn, equipment_id)?.ok_or_else(|| {
            Error::NotFound(format!("Equipment with id {} not found", equipment_id))
        })
    }

    /// Equipment together with the division it belongs to.
    pub fn find_equipment_with_division(
        &self,
        conn: &mut SqliteConnection,
        equipment_id: i32,
    ) -> Result<Option<(Equipment, Division)>> {
        equipment::table
            .inner_join(divisions::table)
            .filter(equipment::id.eq(equipment_id))
            .select((Equipment::as_select(), Division::as_select()))
            .first::<(Equipment, Division)>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn list_equipment(&self, conn: &mut SqliteConnection) -> Result<Vec<Equipment>> {
        equipment::table
            .select(Equipment::as_select())
            .order((equipment::division_id.asc(), equipment::name.asc()))
            .load::<Equipment>(conn)
            .map_err(Error::from)
    }
}

impl Default for EquipmentRepository {
    fn default() -> Self {
        Self::new()
    }
}
