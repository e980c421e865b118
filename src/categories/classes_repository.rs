use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::classes;

use super::categories_model::{Class, NewClass};

/// Repository for class reference data.
pub struct ClassesRepository;

impl ClassesRepository {
    pub fn new() -> Self {
        ClassesRepository
    }

    pub fn create(&self, conn: &mut SqliteConnection, new_class: NewClass) -> Result<Class> {
        new_class.validate()?;

        diesel::insert_into(classes::table)
            .values(&new_class)
            .returning(Class::as_returning())
            .get_result::<Class>(conn)
            .map_err(Error::from)
    }

    pub fn find(&self, conn: &mut SqliteConnection, class_id: i32) -> Result<Option<Class>> {
        classes::table
            .find(class_id)
            .select(Class::as_select())
            .first::<Class>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn get(&self, conn: &mut SqliteConnection, class_id: i32) -> Result<Class> {
        self.find(conn, class_id)?
            .ok_or_else(|| Error::NotFound(format!("Class with id {} not found", class_id)))
    }

    pub fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Class>> {
        classes::table
            .order(classes::name.asc())
            .select(Class::as_select())
            .load::<Class>(conn)
            .map_err(Error::from)
    }
}

impl Default for ClassesRepository {
    fn default() -> Self {
        Self::new()
    }
}
