pub mod db;

pub mod approval;
pub mod archers;
pub mod categories;
pub mod championship;
pub mod competitions;
pub mod equipment;
pub mod records;
pub mod reporting;
pub mod rounds;
pub mod scores;
pub mod scoring;
pub mod staging;

pub mod constants;
pub mod errors;
pub mod schema;

pub use approval::*;
pub use staging::*;
