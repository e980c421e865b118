use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model for a club archer.
///
/// Archers are soft-deleted through `is_active`; rows are never removed
/// while scores reference them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Archer {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub class_id: i32,
    pub default_division_id: i32,
    pub default_equipment_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for archers
#[derive(Queryable, Selectable, Identifiable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::archers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArcherDB {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub class_id: i32,
    pub default_division_id: i32,
    pub default_equipment_id: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new archer
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::archers)]
#[serde(rename_all = "camelCase")]
pub struct NewArcher {
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub class_id: i32,
    pub default_division_id: i32,
    pub default_equipment_id: i32,
}

impl NewArcher {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.gender.trim().is_empty() {
            return Err(ValidationError::MissingField("gender".to_string()).into());
        }
        for id in [
            self.class_id,
            self.default_division_id,
            self.default_equipment_id,
        ] {
            if id <= 0 {
                return Err(ValidationError::NonPositiveId(id).into());
            }
        }
        Ok(())
    }
}

/// Input model for updating an archer's registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcherUpdate {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub class_id: i32,
    pub default_division_id: i32,
    pub default_equipment_id: i32,
    pub is_active: bool,
}

impl ArcherUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(ValidationError::NonPositiveId(self.id).into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        for id in [
            self.class_id,
            self.default_division_id,
            self.default_equipment_id,
        ] {
            if id <= 0 {
                return Err(ValidationError::NonPositiveId(id).into());
            }
        }
        Ok(())
    }
}

impl From<ArcherDB> for Archer {
    fn from(db: ArcherDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            gender: db.gender,
            date_of_birth: db.date_of_birth,
            class_id: db.class_id,
            default_division_id: db.default_division_id,
            default_equipment_id: db.default_equipment_id,
            is_active: db.is_active,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}
