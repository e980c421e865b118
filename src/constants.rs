/// Championship points awarded by placement within a category, first
/// place first. Placements beyond the table score [`TRAILING_PLACEMENT_POINTS`].
pub const PLACEMENT_POINTS: [i32; 9] = [25, 18, 15, 12, 10, 8, 6, 4, 2];

/// Points for 10th place and below.
pub const TRAILING_PLACEMENT_POINTS: i32 = 1;

/// Highest value a single arrow can score.
pub const MAX_ARROW_VALUE: i32 = 10;

/// Points for a placement, 1-indexed.
pub fn placement_points(placement: usize) -> i32 {
    debug_assert!(placement >= 1);
    PLACEMENT_POINTS
        .get(placement - 1)
        .copied()
        .unwrap_or(TRAILING_PLACEMENT_POINTS)
}

/// Minimum number of contributing competitions an archer must have
/// attended to appear in the standings: half the season's contributing
/// competitions, rounded up.
pub fn required_participation(contributing_competitions: usize) -> usize {
    contributing_competitions.div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_points_follow_the_table() {
        assert_eq!(placement_points(1), 25);
        assert_eq!(placement_points(2), 18);
        assert_eq!(placement_points(3), 15);
        assert_eq!(placement_points(9), 2);
        assert_eq!(placement_points(10), 1);
        assert_eq!(placement_points(47), 1);
    }

    #[test]
    fn participation_threshold_rounds_up() {
        assert_eq!(required_participation(4), 2);
        assert_eq!(required_participation(5), 3);
        assert_eq!(required_participation(1), 1);
        assert_eq!(required_participation(0), 0);
    }
}
