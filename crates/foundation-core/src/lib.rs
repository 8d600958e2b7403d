//! # Foundation Core Library
//!
//! This library provides the core logic for Foundation, a habit tracker in
//! which every day a habit is kept lays one more numbered brick on that
//! habit's pyramid. The CLI and any GUI are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Streak tracker**: an in-memory, date-driven state machine. The caller
//!   supplies the calendar date and invokes `tick_daily_boundary()` whenever
//!   the day may have changed; there is no internal timer
//! - **Pyramid layout**: a pure function from brick count to rows of placed
//!   bricks
//! - **Configuration**: TOML-based preferences (milestone and highlight
//!   intervals, starter habits)
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: habit collection and streak rules
//! - [`PyramidLayout`]: brick placement
//! - [`Config`]: application configuration management
//! - [`Event`]: state-change notifications drained from the tracker

pub mod clock;
pub mod error;
pub mod events;
pub mod pyramid;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use pyramid::{AnnotatedBrick, BrickPlacement, PyramidLayout};
pub use storage::{Config, StarterHabit};
pub use streak::{CheckinOutcome, Habit, HabitId, SharedTracker, StreakTracker, TrackerStats};
