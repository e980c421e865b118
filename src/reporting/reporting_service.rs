use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::competitions::CompetitionsRepository;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::rounds::RoundRange;
use crate::schema::{
    archers, arrows, categories, championship_standings, club_bests, competitions, ends,
    equipment, personal_bests, round_ranges, rounds, scores,
};
use crate::scores::{Arrow, End, ScoreDB, ScoresRepository};

use super::reporting_model::{
    ArcherChampionshipSummary, CategoryStandings, ClubBestView, CompetitionCategoryResults,
    CompetitionResultEntry, CompetitionResults, EndDetail, PersonalBestView, ScoreDetail,
    ScoreFilters, ScoreSummary, StandingEntry,
};

type ScoreSummaryRow = (ScoreDB, String, String, String, Option<String>);

/// Read-only aggregation queries over the approved record.
pub struct ReportingService {
    pool: Arc<DbPool>,
    competitions: CompetitionsRepository,
    scores: ScoresRepository,
}

impl ReportingService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ReportingService {
            pool,
            competitions: CompetitionsRepository::new(),
            scores: ScoresRepository::new(),
        }
    }

    pub fn scores_for_archer(
        &self,
        archer_id: i32,
        filters: ScoreFilters,
    ) -> Result<Vec<ScoreSummary>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = scores::table
            .inner_join(archers::table)
            .inner_join(rounds::table)
            .inner_join(equipment::table)
            .left_join(competitions::table)
            .filter(scores::archer_id.eq(archer_id))
            .into_boxed();

        if let Some(from) = filters.from {
            query = query.filter(scores::shot_date.ge(from));
        }
        if let Some(to) = filters.to {
            query = query.filter(scores::shot_date.le(to));
        }
        if let Some(round_id) = filters.round_id {
            query = query.filter(scores::round_id.eq(round_id));
        }

        let rows = query
            .order((scores::shot_date.desc(), scores::id.desc()))
            .select((
                ScoreDB::as_select(),
                archers::name,
                rounds::name,
                equipment::name,
                competitions::name.nullable(),
            ))
            .load::<ScoreSummaryRow>(&mut conn)?;

        Ok(rows.into_iter().map(summary_from_row).collect())
    }

    /// A single score with its end and arrow detail. Arrow values are
    /// re-sorted highest first; storage order is not significant.
    pub fn score_detail(&self, score_id: i32) -> Result<ScoreDetail> {
        let mut conn = get_connection(&self.pool)?;

        let row = scores::table
            .inner_join(archers::table)
            .inner_join(rounds::table)
            .inner_join(equipment::table)
            .left_join(competitions::table)
            .filter(scores::id.eq(score_id))
            .select((
                ScoreDB::as_select(),
                archers::name,
                rounds::name,
                equipment::name,
                competitions::name.nullable(),
            ))
            .first::<ScoreSummaryRow>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Score with id {} not found", score_id)))?;

        let end_rows = ends::table
            .inner_join(round_ranges::table)
            .filter(ends::score_id.eq(score_id))
            .order((round_ranges::range_index.asc(), ends::end_number.asc()))
            .select((End::as_select(), RoundRange::as_select()))
            .load::<(End, RoundRange)>(&mut conn)?;

        let end_ids: Vec<i32> = end_rows.iter().map(|(end, _)| end.id).collect();
        let arrow_rows = arrows::table
            .filter(arrows::end_id.eq_any(&end_ids))
            .select(Arrow::as_select())
            .load::<Arrow>(&mut conn)?;

        let mut values_by_end: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for arrow in arrow_rows {
            values_by_end.entry(arrow.end_id).or_default().push(arrow.value);
        }

        let ends = end_rows
            .into_iter()
            .map(|(end, range)| {
                let mut values = values_by_end.remove(&end.id).unwrap_or_default();
                values.sort_unstable_by(|a, b| b.cmp(a));
                EndDetail {
                    range_index: range.range_index,
                    distance_metres: range.distance_metres,
                    end_number: end.end_number,
                    arrows: values,
                }
            })
            .collect();

        Ok(ScoreDetail {
            summary: summary_from_row(row),
            ends,
        })
    }

    /// Results of a competition grouped by category, best total first,
    /// with placements annotated the same way the standings engine
    /// awards them.
    pub fn competition_results(&self, competition_id: i32) -> Result<CompetitionResults> {
        let mut conn = get_connection(&self.pool)?;
        let competition = self.competitions.get(&mut conn, competition_id)?;
        let rows = self.scores.competition_results(&mut conn, competition_id)?;

        let mut groups: BTreeMap<(i32, i32), CompetitionCategoryResults> = BTreeMap::new();
        let mut placed: BTreeSet<(i32, i32, i32)> = BTreeSet::new();
        let mut next_placement: BTreeMap<(i32, i32), i32> = BTreeMap::new();

        for row in rows {
            let key = (row.class_id, row.division_id);
            let placement = if placed.insert((row.class_id, row.division_id, row.archer_id)) {
                let n = next_placement.entry(key).or_insert(0);
                *n += 1;
                Some(*n)
            } else {
                None
            };

            let category_name = format!("{} {}", row.class_name, row.division_name);
            groups
                .entry(key)
                .or_insert_with(|| CompetitionCategoryResults {
                    category_name,
                    entries: Vec::new(),
                })
                .entries
                .push(CompetitionResultEntry {
                    placement,
                    archer_id: row.archer_id,
                    archer_name: row.archer_name,
                    score_id: row.score_id,
                    total: row.total,
                });
        }

        Ok(CompetitionResults {
            competition,
            categories: groups.into_values().collect(),
        })
    }

    pub fn personal_bests_for_archer(&self, archer_id: i32) -> Result<Vec<PersonalBestView>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = personal_bests::table
            .inner_join(rounds::table)
            .inner_join(equipment::table)
            .inner_join(scores::table)
            .filter(personal_bests::archer_id.eq(archer_id))
            .order((rounds::name.asc(), equipment::name.asc()))
            .select((
                personal_bests::round_id,
                rounds::name,
                personal_bests::equipment_id,
                equipment::name,
                personal_bests::score_id,
                scores::total,
                personal_bests::achieved_on,
            ))
            .load::<(i32, String, i32, String, i32, i32, NaiveDate)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(round_id, round_name, equipment_id, equipment_name, score_id, total, achieved_on)| {
                    PersonalBestView {
                        round_id,
                        round_name,
                        equipment_id,
                        equipment_name,
                        score_id,
                        total,
                        achieved_on,
                    }
                },
            )
            .collect())
    }

    pub fn club_bests(&self, category_id: Option<i32>) -> Result<Vec<ClubBestView>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = club_bests::table
            .inner_join(categories::table)
            .inner_join(rounds::table)
            .inner_join(scores::table.inner_join(archers::table))
            .into_boxed();

        if let Some(category_id) = category_id {
            query = query.filter(club_bests::category_id.eq(category_id));
        }

        let rows = query
            .order((categories::name.asc(), rounds::name.asc()))
            .select((
                club_bests::category_id,
                categories::name,
                club_bests::round_id,
                rounds::name,
                club_bests::score_id,
                scores::archer_id,
                archers::name,
                scores::total,
                club_bests::achieved_on,
            ))
            .load::<(i32, String, i32, String, i32, i32, String, i32, NaiveDate)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    category_id,
                    category_name,
                    round_id,
                    round_name,
                    score_id,
                    archer_id,
                    archer_name,
                    total,
                    achieved_on,
                )| ClubBestView {
                    category_id,
                    category_name,
                    round_id,
                    round_name,
                    score_id,
                    archer_id,
                    archer_name,
                    total,
                    achieved_on,
                },
            )
            .collect())
    }

    /// A season's standings grouped by category, ranked entries in order.
    pub fn standings_for_year(&self, year: i32) -> Result<Vec<CategoryStandings>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = championship_standings::table
            .inner_join(categories::table)
            .inner_join(archers::table)
            .filter(championship_standings::season_year.eq(year))
            .order((
                categories::name.asc(),
                championship_standings::rank.asc(),
            ))
            .select((
                championship_standings::category_id,
                categories::name,
                championship_standings::rank,
                championship_standings::archer_id,
                archers::name,
                championship_standings::points,
                championship_standings::competitions_attended,
            ))
            .load::<(i32, String, i32, i32, String, i32, i32)>(&mut conn)?;

        let mut grouped: Vec<CategoryStandings> = Vec::new();
        for (category_id, category_name, rank, archer_id, archer_name, points, attended) in rows {
            let entry = StandingEntry {
                rank,
                archer_id,
                archer_name,
                points,
                competitions_attended: attended,
            };
            match grouped.last_mut() {
                Some(group) if group.category_id == category_id => group.entries.push(entry),
                _ => grouped.push(CategoryStandings {
                    category_id,
                    category_name,
                    entries: vec![entry],
                }),
            }
        }

        Ok(grouped)
    }

    /// An archer's championship position for a season, one summary per
    /// category they hold a standing in.
    pub fn championship_summary_for_archer(
        &self,
        archer_id: i32,
        year: i32,
    ) -> Result<Vec<ArcherChampionshipSummary>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = championship_standings::table
            .inner_join(categories::table)
            .filter(championship_standings::season_year.eq(year))
            .filter(championship_standings::archer_id.eq(archer_id))
            .order(categories::name.asc())
            .select((
                championship_standings::season_year,
                championship_standings::category_id,
                categories::name,
                championship_standings::rank,
                championship_standings::points,
                championship_standings::competitions_attended,
            ))
            .load::<(i32, i32, String, i32, i32, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(season_year, category_id, category_name, rank, points, attended)| {
                    ArcherChampionshipSummary {
                        season_year,
                        category_id,
                        category_name,
                        rank,
                        points,
                        competitions_attended: attended,
                    }
                },
            )
            .collect())
    }
}

fn summary_from_row(row: ScoreSummaryRow) -> ScoreSummary {
    let (score, archer_name, round_name, equipment_name, competition_name) = row;
    ScoreSummary {
        score_id: score.id,
        archer_id: score.archer_id,
        archer_name,
        round_id: score.round_id,
        round_name,
        equipment_name,
        competition_name,
        shot_date: score.shot_date,
        total: score.total,
        is_practice: score.is_practice,
        is_personal_best: score.is_personal_best,
        is_club_best: score.is_club_best,
    }
}
