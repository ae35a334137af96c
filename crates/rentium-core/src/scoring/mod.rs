pub mod score;

pub use score::{score, Score, ScoreComponent, ScoreLabel};
