use crate::constants::MAX_ARROW_VALUE;

/// Token recorded for an inner-ring ten.
pub const X_TOKEN: &str = "X";

/// Token recorded for a miss.
pub const MISS_TOKEN: &str = "M";

/// Converts a shot's textual score token to its numeric value.
///
/// `"X"` counts as a ten, `"M"` and the empty string count as a miss.
/// Anything else is parsed as an integer; a malformed token scores 0,
/// the same as a miss. Matching is case-insensitive and ignores
/// surrounding whitespace, so scorers typing `" x "` get the expected
/// ten.
pub fn score_value(token: &str) -> i32 {
    let token = token.trim().to_uppercase();
    match token.as_str() {
        X_TOKEN => MAX_ARROW_VALUE,
        MISS_TOKEN | "" => 0,
        other => other.parse::<i32>().unwrap_or(0),
    }
}
