use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use diesel::SqliteConnection;
use log::{debug, info};

use crate::categories::CategoriesRepository;
use crate::competitions::CompetitionsRepository;
use crate::constants::{placement_points, required_participation};
use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::Result;
use crate::scores::ScoresRepository;

use super::championship_model::{ChampionshipStanding, NewStandingRow};
use super::championship_repository::ChampionshipRepository;

/// Running score for one (category, archer) pair during a recompute.
struct Tally {
    category_id: i32,
    archer_id: i32,
    points: i32,
    competitions: Vec<i32>,
}

/// The standings engine. Rebuilds a season's championship table from the
/// approved results of its contributing competitions.
pub struct ChampionshipService {
    pool: Arc<DbPool>,
    repository: ChampionshipRepository,
    competitions: CompetitionsRepository,
    scores: ScoresRepository,
    categories: CategoriesRepository,
}

impl ChampionshipService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ChampionshipService {
            pool,
            repository: ChampionshipRepository::new(),
            competitions: CompetitionsRepository::new(),
            scores: ScoresRepository::new(),
            categories: CategoriesRepository::new(),
        }
    }

    /// Rebuilds the standings for a season in one transaction.
    ///
    /// With no contributing competitions in the year this is a no-op and
    /// any existing standings are left untouched.
    pub fn recompute(&self, year: i32) -> Result<()> {
        self.pool
            .execute(|conn| self.recompute_with_conn(conn, year))
    }

    fn recompute_with_conn(&self, conn: &mut SqliteConnection, year: i32) -> Result<()> {
        let contributing = self.competitions.contributing_in_year(conn, year)?;
        if contributing.is_empty() {
            debug!(
                "No contributing competitions in {}; standings left untouched",
                year
            );
            return Ok(());
        }

        self.repository.delete_for_year(conn, year)?;

        let mut tallies: Vec<Tally> = Vec::new();
        let mut index: BTreeMap<(i32, i32), usize> = BTreeMap::new();

        for competition in &contributing {
            let results = self.scores.competition_results(conn, competition.id)?;

            // Placement per category; an archer's later rows in the same
            // competition do not consume placement numbers.
            let mut next_placement: BTreeMap<i32, usize> = BTreeMap::new();
            let mut placed: BTreeSet<(i32, i32)> = BTreeSet::new();

            for row in results {
                let category = self
                    .categories
                    .find_or_create(conn, row.class_id, row.division_id)?;
                if !placed.insert((category.id, row.archer_id)) {
                    continue;
                }

                let placement = next_placement.entry(category.id).or_insert(0);
                *placement += 1;
                let points = placement_points(*placement);

                let key = (category.id, row.archer_id);
                let slot = *index.entry(key).or_insert_with(|| {
                    tallies.push(Tally {
                        category_id: category.id,
                        archer_id: row.archer_id,
                        points: 0,
                        competitions: Vec::new(),
                    });
                    tallies.len() - 1
                });
                let tally = &mut tallies[slot];
                tally.points += points;
                if !tally.competitions.contains(&competition.id) {
                    tally.competitions.push(competition.id);
                }
            }
        }

        let required = required_participation(contributing.len());
        tallies.retain(|t| t.competitions.len() >= required);

        // Group per category, keeping accumulation order so that equal
        // point totals rank in the order they were earned.
        let mut by_category: BTreeMap<i32, Vec<Tally>> = BTreeMap::new();
        for tally in tallies {
            by_category.entry(tally.category_id).or_default().push(tally);
        }

        let mut rows: Vec<NewStandingRow> = Vec::new();
        for (category_id, mut entries) in by_category {
            entries.sort_by(|a, b| b.points.cmp(&a.points));
            for (position, entry) in entries.into_iter().enumerate() {
                rows.push(NewStandingRow {
                    season_year: year,
                    category_id,
                    archer_id: entry.archer_id,
                    points: entry.points,
                    rank: (position + 1) as i32,
                    competitions_attended: entry.competitions.len() as i32,
                });
            }
        }

        let inserted = self.repository.insert_all(conn, &rows)?;
        info!(
            "Recomputed {} standings: {} rows across {} contributing competitions (min participation {})",
            year,
            inserted,
            contributing.len(),
            required
        );
        Ok(())
    }

    /// Called after a score lands in a competition. Recomputes the season
    /// if that competition counts toward the championship.
    pub fn on_score_approved(&self, competition_id: i32) -> Result<()> {
        let competition = {
            let mut conn = get_connection(&self.pool)?;
            self.competitions.get(&mut conn, competition_id)?
        };

        if !competition.contributes_to_championship {
            debug!(
                "Competition '{}' does not contribute to the championship; skipping recompute",
                competition.name
            );
            return Ok(());
        }

        self.recompute(competition.season_year())
    }

    pub fn standings_for_year(&self, year: i32) -> Result<Vec<ChampionshipStanding>> {
        let mut conn = get_connection(&self.pool)?;
        self.repository.list_for_year(&mut conn, year)
    }
}
