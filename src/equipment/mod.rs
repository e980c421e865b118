pub(crate) mod eligibility;
pub(crate) mod equipment_model;
pub(crate) mod equipment_repository;
pub(crate) mod equipment_service;

pub use eligibility::{
    EligibilityService, EquipmentApproval, EquipmentMatch, EquipmentMismatch, EquipmentVerdict,
};
pub use equipment_model::{Division, Equipment, NewDivision, NewEquipment};
pub use equipment_repository::EquipmentRepository;
pub use equipment_service::EquipmentService;
