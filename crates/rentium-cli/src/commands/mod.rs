pub mod analyze;
pub mod compare;
pub mod regimes;
pub mod schedule;
