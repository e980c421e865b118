use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A shooting discipline (recurve, compound, longbow, barebow...).
/// Static reference data; every piece of equipment belongs to exactly one.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::divisions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: i32,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::equipment)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub division_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::divisions)]
#[serde(rename_all = "camelCase")]
pub struct NewDivision {
    pub name: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::equipment)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub division_id: i32,
}
