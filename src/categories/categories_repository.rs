use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::{categories, classes, divisions};

use super::categories_model::{Category, NewCategoryRow};

/// Repository for the derived (class, division) category pairings.
pub struct CategoriesRepository;

impl CategoriesRepository {
    pub fn new() -> Self {
        CategoriesRepository
    }

    /// Looks up the pairing, creating it on first use. The generated name
    /// joins the class and division names, e.g. "Senior Men Recurve".
    pub fn find_or_create(
        &self,
        conn: &mut SqliteConnection,
        class_id: i32,
        division_id: i32,
    ) -> Result<Category> {
        if let Some(existing) = self.find_by_pair(conn, class_id, division_id)? {
            return Ok(existing);
        }

        let class_name = classes::table
            .find(class_id)
            .select(classes::name)
            .first::<String>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Class with id {} not found", class_id)))?;
        let division_name = divisions::table
            .find(division_id)
            .select(divisions::name)
            .first::<String>(conn)
            .optional()?
            .ok_or_else(|| {
                Error::NotFound(format!("Division with id {} not found", division_id))
            })?;

        diesel::insert_into(categories::table)
            .values(&NewCategoryRow {
                class_id,
                division_id,
                name: format!("{} {}", class_name, division_name),
            })
            .returning(Category::as_returning())
            .get_result::<Category>(conn)
            .map_err(Error::from)
    }

    pub fn find_by_pair(
        &self,
        conn: &mut SqliteConnection,
        class_id: i32,
        division_id: i32,
    ) -> Result<Option<Category>> {
        categories::table
            .filter(categories::class_id.eq(class_id))
            .filter(categories::division_id.eq(division_id))
            .select(Category::as_select())
            .first::<Category>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn find(&self, conn: &mut SqliteConnection, category_id: i32) -> Result<Option<Category>> {
        categories::table
            .find(category_id)
            .select(Category::as_select())
            .first::<Category>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn get(&self, conn: &mut SqliteConnection, category_id: i32) -> Result<Category> {
        self.find(conn, category_id)?
            .ok_or_else(|| Error::NotFound(format!("Category with id {} not found", category_id)))
    }

    pub fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Category>> {
        categories::table
            .order(categories::name.asc())
            .select(Category::as_select())
            .load::<Category>(conn)
            .map_err(Error::from)
    }
}

impl Default for CategoriesRepository {
    fn default() -> Self {
        Self::new()
    }
}
