use std::sync::Arc;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;

use super::categories_model::{Category, Class, NewClass};
use super::categories_repository::CategoriesRepository;
use super::classes_repository::ClassesRepository;

/// Service for classes and the categories derived from them.
pub struct CategoriesService {
    pool: Arc<DbPool>,
    classes: ClassesRepository,
    categories: CategoriesRepository,
}

impl CategoriesService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CategoriesService {
            pool,
            classes: ClassesRepository::new(),
            categories: CategoriesRepository::new(),
        }
    }

    pub fn create_class(&self, new_class: NewClass) -> Result<Class> {
        self.pool
            .execute(|conn| self.classes.create(conn, new_class))
    }

    pub fn list_classes(&self) -> Result<Vec<Class>> {
        let mut conn = get_connection(&self.pool)?;
        self.classes.list(&mut conn)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        self.categories.list(&mut conn)
    }
}
