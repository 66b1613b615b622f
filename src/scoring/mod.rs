pub mod calculator;
pub mod engine;
pub mod summary;

pub use calculator::{bike_score, transit_score, walk_score, ScoreRating};
pub use engine::{ScoreBreakdown, Scorer, WalkabilityResult};
pub use summary::{summarize_amenities, CategorySummary};
