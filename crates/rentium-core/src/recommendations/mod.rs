pub mod engine;
pub mod levers;
pub mod strategy;
pub mod targets;

pub use engine::{recommend, strategies, MAX_RECOMMENDATIONS};
pub use strategy::{Baseline, Effort, Recommendation, RecommendationStrategy};
