pub(crate) mod score_value;

pub use score_value::{score_value, MISS_TOKEN, X_TOKEN};
