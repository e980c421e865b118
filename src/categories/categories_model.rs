use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// An age/gender bracket archers compete in.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::classes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

/// Input model for creating a class
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::classes)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    pub name: String,
    pub gender: String,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl NewClass {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.gender.trim().is_empty() {
            return Err(ValidationError::MissingField("gender".to_string()).into());
        }
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            if min > max {
                return Err(ValidationError::InvalidInput(format!(
                    "min age {} exceeds max age {}",
                    min, max
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// A (class, division) pairing. Categories are a derived grouping key for
/// club bests and championship standings; rows are created on demand the
/// first time a pairing is needed.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub class_id: i32,
    pub division_id: i32,
    pub name: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub(crate) struct NewCategoryRow {
    pub class_id: i32,
    pub division_id: i32,
    pub name: String,
}
