use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;

use scorebook::archers::{Archer, ArcherService, NewArcher};
use scorebook::categories::{CategoriesService, NewClass};
use scorebook::competitions::{Competition, CompetitionsService, NewCompetition};
use scorebook::db::{self, DbPool};
use scorebook::equipment::{EquipmentService, NewEquipment};
use scorebook::rounds::{NewRound, NewRoundRange, RoundsService};
use scorebook::staging::{NewStagedScore, StagingService};

/// A migrated scorebook database in a temp directory. The directory is
/// removed when the value is dropped.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

pub fn setup_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let app_data_dir = dir.path().to_str().expect("Temp dir path is not UTF-8");

    let db_path = db::init(app_data_dir).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    TestDb { pool, _dir: dir }
}

/// Reference data every test starts from: two divisions, a bow in each
/// (plus a spare recurve), one class and a single-range indoor round.
pub struct ClubFixture {
    pub recurve_division_id: i32,
    pub compound_division_id: i32,
    pub club_recurve_id: i32,
    pub spare_recurve_id: i32,
    pub club_compound_id: i32,
    pub senior_class_id: i32,
    pub round_id: i32,
}

pub fn seed_club(pool: &Arc<DbPool>) -> ClubFixture {
    let equipment_service = EquipmentService::new(pool.clone());
    let recurve = equipment_service.create_division("Recurve").unwrap();
    let compound = equipment_service.create_division("Compound").unwrap();
    let club_recurve = equipment_service
        .create_equipment(NewEquipment {
            name: "Club Recurve".to_string(),
            division_id: recurve.id,
        })
        .unwrap();
    let spare_recurve = equipment_service
        .create_equipment(NewEquipment {
            name: "Spare Recurve".to_string(),
            division_id: recurve.id,
        })
        .unwrap();
    let club_compound = equipment_service
        .create_equipment(NewEquipment {
            name: "Club Compound".to_string(),
            division_id: compound.id,
        })
        .unwrap();

    let categories_service = CategoriesService::new(pool.clone());
    let seniors = categories_service
        .create_class(NewClass {
            name: "Senior Gents".to_string(),
            gender: "M".to_string(),
            min_age: None,
            max_age: None,
        })
        .unwrap();

    let rounds_service = RoundsService::new(pool.clone());
    let portsmouth = rounds_service
        .create_round(NewRound {
            name: "Portsmouth".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            effective_to: None,
            ranges: vec![NewRoundRange {
                range_index: 1,
                distance_metres: 18,
                face_size_cm: 60,
                num_ends: 20,
                arrows_per_end: 3,
            }],
        })
        .unwrap();

    ClubFixture {
        recurve_division_id: recurve.id,
        compound_division_id: compound.id,
        club_recurve_id: club_recurve.id,
        spare_recurve_id: spare_recurve.id,
        club_compound_id: club_compound.id,
        senior_class_id: seniors.id,
        round_id: portsmouth.round.id,
    }
}

pub fn create_archer(pool: &Arc<DbPool>, fixture: &ClubFixture, name: &str) -> Archer {
    ArcherService::new(pool.clone())
        .create_archer(NewArcher {
            name: name.to_string(),
            gender: "M".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
            class_id: fixture.senior_class_id,
            default_division_id: fixture.recurve_division_id,
            default_equipment_id: fixture.club_recurve_id,
        })
        .unwrap()
}

pub fn create_competition(
    pool: &Arc<DbPool>,
    name: &str,
    start_date: NaiveDate,
    contributes_to_championship: bool,
) -> Competition {
    CompetitionsService::new(pool.clone())
        .create_competition(NewCompetition {
            name: name.to_string(),
            start_date,
            end_date: start_date,
            location: None,
            is_official: true,
            is_championship: false,
            contributes_to_championship,
        })
        .unwrap()
}

/// Stages a total-only submission and returns the staging id.
pub fn stage_total(
    pool: &Arc<DbPool>,
    fixture: &ClubFixture,
    archer_id: i32,
    equipment_id: i32,
    competition_id: Option<i32>,
    shot_date: NaiveDate,
    total: i32,
) -> i32 {
    StagingService::new(pool.clone())
        .stage_score(NewStagedScore {
            archer_id,
            round_id: fixture.round_id,
            equipment_id,
            competition_id,
            shot_date,
            shot_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            is_practice: false,
            declared_total: Some(total),
            arrows: vec![],
        })
        .unwrap()
}
