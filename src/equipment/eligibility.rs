use std::sync::Arc;

use diesel::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::archers::ArcherRepository;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;

use super::equipment_model::{Division, Equipment};
use super::equipment_repository::EquipmentRepository;

/// How the equipment used for a shot relates to the archer's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentMatch {
    ExactDefault,
    SameDivision,
    DifferentDivision,
}

/// Outcome of checking a shot's equipment against the archer's
/// registration.
///
/// `Unknown` marks a missing archer or equipment reference and must not
/// be conflated with a division mismatch: a mismatch is a legitimate
/// submission the recorder can approve with an override, an unknown
/// reference is bad data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum EquipmentVerdict {
    Valid(EquipmentApproval),
    Mismatch(EquipmentMismatch),
    Unknown { reason: String },
}

impl EquipmentVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, EquipmentVerdict::Valid(_))
    }
}

/// Detail for a valid combination (exact default, or a different bow in
/// the same division; the latter carries a warning for recorder
/// visibility).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentApproval {
    pub match_type: EquipmentMatch,
    pub archer_name: String,
    pub default_equipment_name: String,
    pub selected_equipment_name: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Detail for a cross-division combination. Invalid without an explicit
/// recorder override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentMismatch {
    pub archer_name: String,
    pub default_equipment_name: String,
    pub selected_equipment_name: String,
    pub default_division_name: String,
    pub selected_division_name: String,
    pub reason: String,
    pub suggestion: String,
}

/// Classifies equipment against the archer's registered default.
pub(crate) fn classify(
    archer_name: &str,
    default: &(Equipment, Division),
    selected: &(Equipment, Division),
) -> EquipmentVerdict {
    let (default_equipment, default_division) = default;
    let (selected_equipment, selected_division) = selected;

    if selected_equipment.id == default_equipment.id {
        return EquipmentVerdict::Valid(EquipmentApproval {
            match_type: EquipmentMatch::ExactDefault,
            archer_name: archer_name.to_string(),
            default_equipment_name: default_equipment.name.clone(),
            selected_equipment_name: selected_equipment.name.clone(),
            reason: format!(
                "{} shot with their default equipment, {}.",
                archer_name, default_equipment.name
            ),
            warning: None,
        });
    }

    if selected_division.id == default_division.id {
        return EquipmentVerdict::Valid(EquipmentApproval {
            match_type: EquipmentMatch::SameDivision,
            archer_name: archer_name.to_string(),
            default_equipment_name: default_equipment.name.clone(),
            selected_equipment_name: selected_equipment.name.clone(),
            reason: format!(
                "{} shot with {} rather than their default {}; both are {} division equipment.",
                archer_name,
                selected_equipment.name,
                default_equipment.name,
                selected_division.name
            ),
            warning: Some(format!(
                "Equipment differs from the archer's default. The score still counts toward {} division records.",
                selected_division.name
            )),
        });
    }

    EquipmentVerdict::Mismatch(EquipmentMismatch {
        archer_name: archer_name.to_string(),
        default_equipment_name: default_equipment.name.clone(),
        selected_equipment_name: selected_equipment.name.clone(),
        default_division_name: default_division.name.clone(),
        selected_division_name: selected_division.name.clone(),
        reason: format!(
            "{} is registered with {} in the {} division, but this score was shot with {} in the {} division.",
            archer_name,
            default_equipment.name,
            default_division.name,
            selected_equipment.name,
            selected_division.name
        ),
        suggestion: format!(
            "Confirm with {} that the cross-division entry is intended and approve with an override, or correct the equipment on the staged score.",
            archer_name
        ),
    })
}

/// Checks whether the equipment used for a shot is an eligible choice
/// for the archer.
pub struct EligibilityService {
    pool: Arc<DbPool>,
    archer_repo: ArcherRepository,
    equipment_repo: EquipmentRepository,
}

impl EligibilityService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            archer_repo: ArcherRepository::new(),
            equipment_repo: EquipmentRepository::new(),
        }
    }

    pub fn check(&self, archer_id: i32, equipment_id: i32) -> Result<EquipmentVerdict> {
        let mut conn = get_connection(&self.pool)?;
        self.check_with_conn(&mut conn, archer_id, equipment_id)
    }

    /// Variant for callers that are already inside a transaction (the
    /// approval pipeline runs the check on its own connection).
    pub fn check_with_conn(
        &self,
        conn: &mut SqliteConnection,
        archer_id: i32,
        equipment_id: i32,
    ) -> Result<EquipmentVerdict> {
        let archer = match self.archer_repo.find(conn, archer_id)? {
            Some(archer) => archer,
            None => {
                return Ok(EquipmentVerdict::Unknown {
                    reason: format!("Archer with id {} not found", archer_id),
                })
            }
        };

        let default = match self
            .equipment_repo
            .find_equipment_with_division(conn, archer.default_equipment_id)?
        {
            Some(pair) => pair,
            None => {
                return Ok(EquipmentVerdict::Unknown {
                    reason: format!(
                        "Default equipment with id {} not found for archer {}",
                        archer.default_equipment_id, archer.name
                    ),
                })
            }
        };

        let selected = match self
            .equipment_repo
            .find_equipment_with_division(conn, equipment_id)?
        {
            Some(pair) => pair,
            None => {
                return Ok(EquipmentVerdict::Unknown {
                    reason: format!("Equipment with id {} not found", equipment_id),
                })
            }
        };

        let verdict = classify(&archer.name, &default, &selected);
        debug!(
            "Equipment check for archer {} with equipment {}: valid={}",
            archer_id,
            equipment_id,
            verdict.is_valid()
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equipment(id: i32, name: &str, division_id: i32) -> Equipment {
        Equipment {
            id,
            name: name.to_string(),
            division_id,
        }
    }

    fn division(id: i32, name: &str) -> Division {
        Division {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn default_equipment_is_an_exact_match() {
        let recurve = (equipment(1, "Club Recurve 28lb", 1), division(1, "Recurve"));
        let verdict = classify("Robin Hartley", &recurve, &recurve);
        match verdict {
            EquipmentVerdict::Valid(approval) => {
                assert_eq!(approval.match_type, EquipmentMatch::ExactDefault);
                assert!(approval.warning.is_none());
            }
            other => panic!("expected exact-default approval, got {:?}", other),
        }
    }

    #[test]
    fn same_division_is_valid_but_warned() {
        let default = (equipment(1, "Club Recurve 28lb", 1), division(1, "Recurve"));
        let selected = (equipment(2, "Own Recurve 32lb", 1), division(1, "Recurve"));
        let verdict = classify("Robin Hartley", &default, &selected);
        match verdict {
            EquipmentVerdict::Valid(approval) => {
                assert_eq!(approval.match_type, EquipmentMatch::SameDivision);
                assert!(approval.warning.is_some());
            }
            other => panic!("expected same-division approval, got {:?}", other),
        }
    }

    #[test]
    fn cross_division_is_a_mismatch_with_both_division_names() {
        let default = (equipment(1, "Club Recurve 28lb", 1), division(1, "Recurve"));
        let selected = (equipment(3, "Club Compound", 2), division(2, "Compound"));
        let verdict = classify("Robin Hartley", &default, &selected);
        match verdict {
            EquipmentVerdict::Mismatch(mismatch) => {
                assert_eq!(mismatch.default_division_name, "Recurve");
                assert_eq!(mismatch.selected_division_name, "Compound");
                assert!(!mismatch.suggestion.is_empty());
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn verdict_serializes_with_a_tag_and_snake_case_match_type() {
        let default = (equipment(1, "Club Recurve", 1), division(1, "Recurve"));
        let selected = (equipment(2, "Own Recurve", 1), division(1, "Recurve"));
        let verdict = classify("Robin Hartley", &default, &selected);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["verdict"], "valid");
        assert_eq!(json["matchType"], "same_division");
    }
}
