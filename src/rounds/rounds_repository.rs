use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::{round_ranges, rounds};

use super::rounds_model::{
    NewRound, NewRoundRange, NewRoundRangeRow, NewRoundRow, Round, RoundRange, RoundWithRanges,
};

/// Repository for round definitions and their ranges.
pub struct RoundsRepository;

impl RoundsRepository {
    pub fn new() -> Self {
        RoundsRepository
    }

    /// Inserts the round and all of its ranges. The caller supplies the
    /// enclosing transaction.
    pub fn create(&self, conn: &mut SqliteConnection, new_round: NewRound) -> Result<RoundWithRanges> {
        new_round.validate()?;

        let round = diesel::insert_into(rounds::table)
            .values(&NewRoundRow {
                name: new_round.name.clone(),
                total_arrows: new_round.total_arrows(),
                effective_from: new_round.effective_from,
                effective_to: new_round.effective_to,
            })
            .returning(Round::as_returning())
            .get_result::<Round>(conn)?;

        let mut ordered: Vec<NewRoundRange> = new_round.ranges;
        ordered.sort_by_key(|r| r.range_index);

        let ranges = ordered
            .into_iter()
            .map(|r| {
                diesel::insert_into(round_ranges::table)
                    .values(&NewRoundRangeRow {
                        round_id: round.id,
                        range_index: r.range_index,
                        distance_metres: r.distance_metres,
                        face_size_cm: r.face_size_cm,
                        num_ends: r.num_ends,
                        arrows_per_end: r.arrows_per_end,
                    })
                    .returning(RoundRange::as_returning())
                    .get_result::<RoundRange>(conn)
                    .map_err(Error::from)
            })
            .collect::<Result<Vec<RoundRange>>>()?;

        Ok(RoundWithRanges { round, ranges })
    }

    pub fn find(&self, conn: &mut SqliteConnection, round_id: i32) -> Result<Option<Round>> {
        rounds::table
            .find(round_id)
            .select(Round::as_select())
            .first::<Round>(conn)
            .optional()
            .map_err(Error::from)
    }

    pub fn get(&self, conn: &mut SqliteConnection, round_id: i32) -> Result<Round> {
        self.find(conn, round_id)?
            .ok_or_else(|| Error::NotFound(format!("Round with id {} not found", round_id)))
    }

    pub fn get_with_ranges(
        &self,
        conn: &mut SqliteConnection,
        round_id: i32,
    ) -> Result<RoundWithRanges> {
        let round = self.get(conn, round_id)?;
        let ranges = self.ranges_for_round(conn, round_id)?;
        Ok(RoundWithRanges { round, ranges })
    }

    pub fn ranges_for_round(
        &self,
        conn: &mut SqliteConnection,
        round_id: i32,
    ) -> Result<Vec<RoundRange>> {
        round_ranges::table
            .filter(round_ranges::round_id.eq(round_id))
            .order(round_ranges::range_index.asc())
            .select(RoundRange::as_select())
            .load::<RoundRange>(conn)
            .map_err(Error::from)
    }

    /// Resolves a range by its position within the round.
    pub fn find_range(
        &self,
        conn: &mut SqliteConnection,
        round_id: i32,
        range_index: i32,
    ) -> Result<Option<RoundRange>> {
        round_ranges::table
            .filter(round_ranges::round_id.eq(round_id))
            .filter(round_ranges::range_index.eq(range_index))
            .select(RoundRange::as_select())
            .first::<RoundRange>(conn)
            .optional()
            .map_err(Error::from)
    }

    /// The definition of the named round that was in force on `date`,
    /// if any. Effectiveness windows of same-named definitions are
    /// expected not to overlap.
    pub fn find_by_name_effective_on(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        date: chrono::NaiveDate,
    ) -> Result<Option<Round>> {
        let candidates = rounds::table
            .filter(rounds::name.eq(name))
            .order(rounds::effective_from.desc())
            .select(Round::as_select())
            .load::<Round>(conn)?;

        Ok(candidates.into_iter().find(|r| r.is_effective_on(date)))
    }

    pub fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Round>> {
        rounds::table
            .order((rounds::name.asc(), rounds::effective_from.desc()))
            .select(Round::as_select())
            .load::<Round>(conn)
            .map_err(Error::from)
    }
}

impl Default for RoundsRepository {
    fn default() -> Self {
        Self::new()
    }
}
