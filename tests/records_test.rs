use std::sync::Arc;

use chrono::NaiveDate;

use scorebook::approval::{ApprovalOutcome, ApprovalService};
use scorebook::db::DbPool;
use scorebook::records::{RecordOutcome, RecordsService};
use scorebook::reporting::{ReportingService, ScoreFilters};

mod common;

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

/// Stages a total-only submission and approves it, returning the score id.
fn approved_score(
    pool: &Arc<DbPool>,
    fixture: &common::ClubFixture,
    archer_id: i32,
    equipment_id: i32,
    shot_date: NaiveDate,
    total: i32,
) -> i32 {
    let staging_id =
        common::stage_total(pool, fixture, archer_id, equipment_id, None, shot_date, total);
    match ApprovalService::new(pool.clone())
        .approve(staging_id, None, true)
        .unwrap()
    {
        ApprovalOutcome::Approved { score_id } => score_id,
        other => panic!("expected an approval, got {:?}", other),
    }
}

#[test]
fn test_first_approved_score_creates_personal_best() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let archer = common::create_archer(&test_db.pool, &fixture, "Mara Quinn");

    let score_id = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(3),
        540,
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.personal_bests_for_archer(archer.id).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].score_id, score_id);
    assert_eq!(bests[0].total, 540);
    assert_eq!(bests[0].achieved_on, day(3));

    let history = reporting
        .scores_for_archer(archer.id, ScoreFilters::default())
        .unwrap();
    assert!(history[0].is_personal_best);
}

#[test]
fn test_higher_total_takes_over_the_record() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let archer = common::create_archer(&test_db.pool, &fixture, "Nils Berg");

    let first = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(3),
        540,
    );
    let second = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(10),
        561,
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.personal_bests_for_archer(archer.id).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].score_id, second);
    assert_eq!(bests[0].total, 561);
    assert_eq!(bests[0].achieved_on, day(10));

    // The flag moved with the record
    let history = reporting
        .scores_for_archer(archer.id, ScoreFilters::default())
        .unwrap();
    let first_row = history.iter().find(|s| s.score_id == first).unwrap();
    let second_row = history.iter().find(|s| s.score_id == second).unwrap();
    assert!(!first_row.is_personal_best);
    assert!(second_row.is_personal_best);
    assert_eq!(history.iter().filter(|s| s.is_personal_best).count(), 1);
}

#[test]
fn test_lower_total_leaves_the_record_alone() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let archer = common::create_archer(&test_db.pool, &fixture, "Owen Price");

    let first = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(3),
        561,
    );
    approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(10),
        540,
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.personal_bests_for_archer(archer.id).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].score_id, first);
    assert_eq!(bests[0].total, 561);
}

#[test]
fn test_equal_total_keeps_the_earlier_record() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let archer = common::create_archer(&test_db.pool, &fixture, "Pia Sorensen");

    let first = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(3),
        561,
    );
    let second = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(10),
        561,
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.personal_bests_for_archer(archer.id).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].score_id, first);
    assert_eq!(bests[0].achieved_on, day(3));

    let history = reporting
        .scores_for_archer(archer.id, ScoreFilters::default())
        .unwrap();
    let second_row = history.iter().find(|s| s.score_id == second).unwrap();
    assert!(!second_row.is_personal_best);
}

#[test]
fn test_records_track_equipment_separately() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let archer = common::create_archer(&test_db.pool, &fixture, "Rosa Ibanez");

    approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(3),
        540,
    );
    // Same round, different bow: its own record, not a challenger
    approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.spare_recurve_id,
        day(10),
        512,
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.personal_bests_for_archer(archer.id).unwrap();
    assert_eq!(bests.len(), 2);

    let club_bow = bests
        .iter()
        .find(|b| b.equipment_id == fixture.club_recurve_id)
        .unwrap();
    let spare_bow = bests
        .iter()
        .find(|b| b.equipment_id == fixture.spare_recurve_id)
        .unwrap();
    assert_eq!(club_bow.total, 540);
    assert_eq!(spare_bow.total, 512);
}

#[test]
fn test_club_best_is_shared_across_the_category() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let sam = common::create_archer(&test_db.pool, &fixture, "Sam Veld");
    let tess = common::create_archer(&test_db.pool, &fixture, "Tess Adeyemi");

    let sams_score = approved_score(
        &test_db.pool,
        &fixture,
        sam.id,
        fixture.club_recurve_id,
        day(3),
        540,
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.club_bests(None).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].archer_id, sam.id);
    assert_eq!(bests[0].category_name, "Senior Gents Recurve");

    // A club mate in the same class and division beats it
    let tess_score = approved_score(
        &test_db.pool,
        &fixture,
        tess.id,
        fixture.club_recurve_id,
        day(17),
        555,
    );

    let bests = reporting.club_bests(None).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].archer_id, tess.id);
    assert_eq!(bests[0].score_id, tess_score);
    assert_eq!(bests[0].total, 555);

    // The flag follows the record between archers
    let sams_history = reporting
        .scores_for_archer(sam.id, ScoreFilters::default())
        .unwrap();
    let sams_row = sams_history.iter().find(|s| s.score_id == sams_score).unwrap();
    assert!(!sams_row.is_club_best);

    let tess_history = reporting
        .scores_for_archer(tess.id, ScoreFilters::default())
        .unwrap();
    let tess_row = tess_history.iter().find(|s| s.score_id == tess_score).unwrap();
    assert!(tess_row.is_club_best);
}

#[test]
fn test_refresh_leaves_the_current_record_holder_in_place() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let archer = common::create_archer(&test_db.pool, &fixture, "Wren Abbot");

    let score_id = approved_score(
        &test_db.pool,
        &fixture,
        archer.id,
        fixture.club_recurve_id,
        day(9),
        544,
    );

    // Re-running the record checks against the score that already holds
    // both records changes nothing
    let outcomes = RecordsService::new(test_db.pool.clone())
        .refresh_for_score(score_id)
        .unwrap();
    assert_eq!(
        outcomes,
        (RecordOutcome::Unchanged, RecordOutcome::Unchanged)
    );

    let reporting = ReportingService::new(test_db.pool.clone());
    let bests = reporting.personal_bests_for_archer(archer.id).unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].score_id, score_id);

    let history = reporting
        .scores_for_archer(archer.id, ScoreFilters::default())
        .unwrap();
    assert!(history[0].is_personal_best);
    assert!(history[0].is_club_best);
}
