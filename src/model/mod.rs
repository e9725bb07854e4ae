pub mod payload;
pub mod schedule;
