pub mod compare;
pub mod scenario;

pub use compare::{compare_scenarios, ScenarioComparison, ScenarioRow};
pub use scenario::Scenario;
