mod habit;
mod shared;
mod tracker;

pub use habit::{Habit, HabitId};
pub use shared::SharedTracker;
pub use tracker::{CheckinOutcome, StreakTracker, TrackerStats, DEFAULT_MILESTONE_INTERVAL};
