use diesel::prelude::*;

use crate::errors::{Error, Result};
use crate::schema::championship_standings;

use super::championship_model::{ChampionshipStanding, NewStandingRow};

/// Repository for championship standings rows.
pub struct ChampionshipRepository;

impl ChampionshipRepository {
    pub fn new() -> Self {
        ChampionshipRepository
    }

    pub fn delete_for_year(&self, conn: &mut SqliteConnection, year: i32) -> Result<usize> {
        diesel::delete(
            championship_standings::table.filter(championship_standings::season_year.eq(year)),
        )
        .execute(conn)
        .map_err(Error::from)
    }

    pub fn insert_all(
        &self,
        conn: &mut SqliteConnection,
        rows: &[NewStandingRow],
    ) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(championship_standings::table)
            .values(rows)
            .execute(conn)
            .map_err(Error::from)
    }

    pub fn list_for_year(
        &self,
        conn: &mut SqliteConnection,
        year: i32,
    ) -> Result<Vec<ChampionshipStanding>> {
        championship_standings::table
            .filter(championship_standings::season_year.eq(year))
            .order((
                championship_standings::category_id.asc(),
                championship_standings::rank.asc(),
            ))
            .select(ChampionshipStanding::as_select())
            .load::<ChampionshipStanding>(conn)
            .map_err(Error::from)
    }

    /// An archer can hold a standing in more than one category in a
    /// season, one per (class, division) pairing they competed in.
    pub fn for_archer_in_year(
        &self,
        conn: &mut SqliteConnection,
        year: i32,
        archer_id: i32,
    ) -> Result<Vec<ChampionshipStanding>> {
        championship_standings::table
            .filter(championship_standings::season_year.eq(year))
            .filter(championship_standings::archer_id.eq(archer_id))
            .order(championship_standings::category_id.asc())
            .select(ChampionshipStanding::as_select())
            .load::<ChampionshipStanding>(conn)
            .map_err(Error::from)
    }
}

impl Default for ChampionshipRepository {
    fn default() -> Self {
        Self::new()
    }
}
