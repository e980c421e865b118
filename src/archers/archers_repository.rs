use chrono::Utc;
use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::archers;

use super::archers_model::{Archer, ArcherDB, ArcherUpdate, NewArcher};

/// Repository for archer registration data.
pub struct ArcherRepository;

impl ArcherRepository {
    pub fn new() -> Self {
        ArcherRepository
    }

    pub fn create(&self, conn: &mut SqliteConnection, new_archer: NewArcher) -> Result<Archer> {
        new_archer.validate()?;

        diesel::insert_into(archers::table)
            .values(&new_archer)
            .returning(ArcherDB::as_returning())
            .get_result::<ArcherDB>(conn)
            .map(Archer::from)
            .map_err(Error::from)
    }

    pub fn find(&self, conn: &mut SqliteConnection, archer_id: i32) -> Result<Option<Archer>> {
        archers::table
            .find(archer_id)
            .select(ArcherDB::as_select())
            .first::<ArcherDB>(conn)
            .optional()
            .map(|row| row.map(Archer::from))
            .map_err(Error::from)
    }

    pub fn get(&self, conn: &mut SqliteConnection, archer_id: i32) -> Result<Archer> {
        self.find(conn, archer_id)?
            .ok_or_else(|| Error::NotFound(format!("Archer with id {} not found", archer_id)))
    }

    pub fn list(
        &self,
        conn: &mut SqliteConnection,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Archer>> {
        let mut query = archers::table.into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(archers::is_active.eq(active));
        }

        query
            .select(ArcherDB::as_select())
            .order((archers::is_active.desc(), archers::name.asc()))
            .load::<ArcherDB>(conn)
            .map(|rows| rows.into_iter().map(Archer::from).collect())
            .map_err(Error::from)
    }

    pub fn update(&self, conn: &mut SqliteConnection, update: ArcherUpdate) -> Result<Archer> {
        update.validate()?;

        let existing = archers::table
            .find(update.id)
            .select(ArcherDB::as_select())
            .first::<ArcherDB>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Archer with id {} not found", update.id)))?;

        let changed = ArcherDB {
            id: existing.id,
            name: update.name,
            gender: update.gender,
            date_of_birth: update.date_of_birth,
            class_id: update.class_id,
            default_division_id: update.default_division_id,
            default_equipment_id: update.default_equipment_id,
            is_active: update.is_active,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
        };

        diesel::update(archers::table.find(changed.id))
            .set(&changed)
            .execute(conn)?;

        Ok(changed.into())
    }

    /// Soft delete; the row stays for the scores that reference it.
    pub fn set_active(
        &self,
        conn: &mut SqliteConnection,
        archer_id: i32,
        active: bool,
    ) -> Result<()> {
        let affected = diesel::update(archers::table.find(archer_id))
            .set((
                archers::is_active.eq(active),
                archers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Archer with id {} not found",
                archer_id
            )));
        }

        Ok(())
    }
}

impl Default for ArcherRepository {
    fn default() -> Self {
        Self::new()
    }
}
