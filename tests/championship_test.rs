use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use scorebook::approval::{ApprovalOutcome, ApprovalService};
use scorebook::championship::ChampionshipService;
use scorebook::db::DbPool;
use scorebook::reporting::ReportingService;
use scorebook::staging::{NewStagedScore, StagingService};

mod common;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// Stages and approves a competition score shot with the club recurve.
fn approve_competition_score(
    pool: &Arc<DbPool>,
    fixture: &common::ClubFixture,
    archer_id: i32,
    competition_id: i32,
    shot_date: NaiveDate,
    total: i32,
) -> i32 {
    let staging_id = common::stage_total(
        pool,
        fixture,
        archer_id,
        fixture.club_recurve_id,
        Some(competition_id),
        shot_date,
        total,
    );
    match ApprovalService::new(pool.clone())
        .approve(staging_id, None, true)
        .unwrap()
    {
        ApprovalOutcome::Approved { score_id } => score_id,
        other => panic!("expected an approval, got {:?}", other),
    }
}

#[test]
fn test_standings_follow_placement_points() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let alice = common::create_archer(&test_db.pool, &fixture, "Alice Munro");
    let bruno = common::create_archer(&test_db.pool, &fixture, "Bruno Keller");
    let cara = common::create_archer(&test_db.pool, &fixture, "Cara Okonkwo");

    let spring = common::create_competition(&test_db.pool, "Spring Open", june(1), true);
    let summer = common::create_competition(&test_db.pool, "Summer Open", june(8), true);

    // Spring: Alice, Bruno, Cara take 25/18/15
    approve_competition_score(&test_db.pool, &fixture, alice.id, spring.id, june(1), 590);
    approve_competition_score(&test_db.pool, &fixture, bruno.id, spring.id, june(1), 580);
    approve_competition_score(&test_db.pool, &fixture, cara.id, spring.id, june(1), 570);

    // Summer: Bruno, Cara, Alice take 25/18/15
    approve_competition_score(&test_db.pool, &fixture, bruno.id, summer.id, june(8), 585);
    approve_competition_score(&test_db.pool, &fixture, cara.id, summer.id, june(8), 575);
    approve_competition_score(&test_db.pool, &fixture, alice.id, summer.id, june(8), 565);

    // Approvals trigger the recompute on their own
    let reporting = ReportingService::new(test_db.pool.clone());
    let standings = reporting.standings_for_year(2025).unwrap();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].category_name, "Senior Gents Recurve");

    let entries = &standings[0].entries;
    assert_eq!(entries.len(), 3);
    assert_eq!(
        (entries[0].rank, entries[0].archer_id, entries[0].points),
        (1, bruno.id, 43)
    );
    assert_eq!(
        (entries[1].rank, entries[1].archer_id, entries[1].points),
        (2, alice.id, 40)
    );
    assert_eq!(
        (entries[2].rank, entries[2].archer_id, entries[2].points),
        (3, cara.id, 33)
    );
    assert!(entries.iter().all(|e| e.competitions_attended == 2));

    // A manual rebuild replaces the table wholesale with the same rows
    ChampionshipService::new(test_db.pool.clone())
        .recompute(2025)
        .unwrap();
    let rebuilt = reporting.standings_for_year(2025).unwrap();
    assert_eq!(rebuilt, standings);
}

#[test]
fn test_participation_filter_drops_casual_entrants() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let dana = common::create_archer(&test_db.pool, &fixture, "Dana Whitfield");
    let elle = common::create_archer(&test_db.pool, &fixture, "Elle Marchetti");

    // Four contributing competitions; half of them must be attended
    let comp1 = common::create_competition(&test_db.pool, "Round One", june(1), true);
    let comp2 = common::create_competition(&test_db.pool, "Round Two", june(8), true);
    common::create_competition(&test_db.pool, "Round Three", june(15), true);
    common::create_competition(&test_db.pool, "Round Four", june(22), true);

    approve_competition_score(&test_db.pool, &fixture, dana.id, comp1.id, june(1), 570);
    approve_competition_score(&test_db.pool, &fixture, elle.id, comp1.id, june(1), 560);
    approve_competition_score(&test_db.pool, &fixture, dana.id, comp2.id, june(8), 500);

    let reporting = ReportingService::new(test_db.pool.clone());
    let standings = reporting.standings_for_year(2025).unwrap();
    assert_eq!(standings.len(), 1);

    // Elle attended one of four and is filtered out; Dana won both of hers
    let entries = &standings[0].entries;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].archer_id, dana.id);
    assert_eq!(entries[0].points, 50);
    assert_eq!(entries[0].competitions_attended, 2);
}

#[test]
fn test_repeat_scores_do_not_consume_placements() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let alice = common::create_archer(&test_db.pool, &fixture, "Alice Munro");
    let bruno = common::create_archer(&test_db.pool, &fixture, "Bruno Keller");

    let open = common::create_competition(&test_db.pool, "Club Open", june(1), true);

    let alices_best = approve_competition_score(&test_db.pool, &fixture, alice.id, open.id, june(1), 590);
    let alices_other = approve_competition_score(&test_db.pool, &fixture, alice.id, open.id, june(1), 585);
    let brunos = approve_competition_score(&test_db.pool, &fixture, bruno.id, open.id, june(1), 580);

    // Alice's second score outranks Bruno's but earns no placement
    let reporting = ReportingService::new(test_db.pool.clone());
    let results = reporting.competition_results(open.id).unwrap();
    assert_eq!(results.categories.len(), 1);

    let entries = &results.categories[0].entries;
    assert_eq!(entries.len(), 3);
    assert_eq!((entries[0].score_id, entries[0].placement), (alices_best, Some(1)));
    assert_eq!((entries[1].score_id, entries[1].placement), (alices_other, None));
    assert_eq!((entries[2].score_id, entries[2].placement), (brunos, Some(2)));

    // Bruno gets runner-up points, not third place
    let standings = reporting.standings_for_year(2025).unwrap();
    let entries = &standings[0].entries;
    assert_eq!((entries[0].archer_id, entries[0].points), (alice.id, 25));
    assert_eq!((entries[1].archer_id, entries[1].points), (bruno.id, 18));
}

#[test]
fn test_non_contributing_competitions_earn_nothing() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let alice = common::create_archer(&test_db.pool, &fixture, "Alice Munro");

    let league = common::create_competition(&test_db.pool, "League Night", june(3), false);
    approve_competition_score(&test_db.pool, &fixture, alice.id, league.id, june(3), 540);

    // The approval did not trigger a recompute
    let reporting = ReportingService::new(test_db.pool.clone());
    assert!(reporting.standings_for_year(2025).unwrap().is_empty());

    let open = common::create_competition(&test_db.pool, "Club Open", june(10), true);
    approve_competition_score(&test_db.pool, &fixture, alice.id, open.id, june(10), 550);

    // Only the contributing competition counts toward the season
    let standings = reporting.standings_for_year(2025).unwrap();
    let entries = &standings[0].entries;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].points, 25);
    assert_eq!(entries[0].competitions_attended, 1);
}

#[test]
fn test_practice_scores_never_place() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let alice = common::create_archer(&test_db.pool, &fixture, "Alice Munro");
    let bruno = common::create_archer(&test_db.pool, &fixture, "Bruno Keller");

    let open = common::create_competition(&test_db.pool, "Club Open", june(1), true);

    // Alice shoots the higher score, but as practice
    let staging_id = StagingService::new(test_db.pool.clone())
        .stage_score(NewStagedScore {
            archer_id: alice.id,
            round_id: fixture.round_id,
            equipment_id: fixture.club_recurve_id,
            competition_id: Some(open.id),
            shot_date: june(1),
            shot_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            is_practice: true,
            declared_total: Some(590),
            arrows: vec![],
        })
        .unwrap();
    ApprovalService::new(test_db.pool.clone())
        .approve(staging_id, None, true)
        .unwrap();

    approve_competition_score(&test_db.pool, &fixture, bruno.id, open.id, june(1), 580);

    let reporting = ReportingService::new(test_db.pool.clone());
    let results = reporting.competition_results(open.id).unwrap();
    let entries = &results.categories[0].entries;
    assert_eq!(entries.len(), 1);
    assert_eq!((entries[0].archer_id, entries[0].placement), (bruno.id, Some(1)));

    let standings = reporting.standings_for_year(2025).unwrap();
    let entries = &standings[0].entries;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].archer_id, bruno.id);
}

#[test]
fn test_recompute_scopes_to_a_single_season() {
    let test_db = common::setup_db();
    let fixture = common::seed_club(&test_db.pool);
    let alice = common::create_archer(&test_db.pool, &fixture, "Alice Munro");

    let open = common::create_competition(&test_db.pool, "Club Open", june(1), true);
    approve_competition_score(&test_db.pool, &fixture, alice.id, open.id, june(1), 550);

    let reporting = ReportingService::new(test_db.pool.clone());
    let before = reporting.standings_for_year(2025).unwrap();
    assert_eq!(before.len(), 1);

    // A season with no contributing competitions rebuilds nothing and
    // leaves other seasons alone
    let championship = ChampionshipService::new(test_db.pool.clone());
    championship.recompute(2026).unwrap();

    assert!(reporting.standings_for_year(2026).unwrap().is_empty());
    assert_eq!(reporting.standings_for_year(2025).unwrap(), before);
}
