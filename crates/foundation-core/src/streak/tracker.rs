//! Streak tracker.
//!
//! Owns the ordered habit collection and applies the two streak rules:
//! one brick per habit per calendar day on check-in, and expiry after a
//! whole calendar day goes by without one. There is no internal timer; the
//! host calls `tick_daily_boundary()` at start-up and whenever it notices the
//! date has changed. Calling it more often is harmless because the rule only
//! compares dates.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = StreakTracker::new();
//! let habit = tracker.create("Read")?;
//! tracker.tick_daily_boundary(today);
//! if let Some(outcome) = tracker.check_in(habit.id(), today) {
//!     if outcome.milestone { /* celebrate */ }
//! }
//! ```

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::habit::{Habit, HabitId};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::{Config, StarterHabit};

/// Default number of check-ins between milestone celebrations.
pub const DEFAULT_MILESTONE_INTERVAL: u32 = 5;

/// Result of a check-in on a known habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinOutcome {
    /// Habit state after the call.
    pub habit: Habit,
    /// False when the habit had already been checked in on that date.
    pub applied: bool,
    /// Advisory: the new streak is a multiple of the milestone interval.
    pub milestone: bool,
}

/// Aggregate figures across all habits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    pub habit_count: usize,
    pub total_streak_days: u64,
    pub total_bricks: u64,
    pub longest_streak: u32,
}

#[derive(Debug, Clone)]
pub struct StreakTracker {
    habits: IndexMap<HabitId, Habit>,
    next_id: u64,
    milestone_interval: u32,
    pending_events: Vec<Event>,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::with_milestone_interval(DEFAULT_MILESTONE_INTERVAL)
    }

    /// Create with a custom milestone interval. Zero is treated as one.
    pub fn with_milestone_interval(interval: u32) -> Self {
        Self {
            habits: IndexMap::new(),
            next_id: 1,
            milestone_interval: interval.max(1),
            pending_events: Vec::new(),
        }
    }

    /// Build a tracker from configuration, seeding any starter habits.
    pub fn from_config(config: &Config, seed: bool) -> Result<Self> {
        let mut tracker = Self::with_milestone_interval(config.tracker.milestone_interval);
        if seed {
            for StarterHabit { name, streak } in &config.starter_habits {
                tracker.seed(name, *streak)?;
            }
        }
        Ok(tracker)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn milestone_interval(&self) -> u32 {
        self.milestone_interval
    }

    pub fn get(&self, id: HabitId) -> Option<&Habit> {
        self.habits.get(&id)
    }

    /// Snapshot of all habits in creation order.
    pub fn list_habits(&self) -> Vec<Habit> {
        self.habits.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Whether a check-in on `today` would lay a brick. Unknown ids yield false.
    pub fn can_check_in(&self, id: HabitId, today: NaiveDate) -> bool {
        self.habits
            .get(&id)
            .is_some_and(|habit| habit.can_check_in(today))
    }

    pub fn stats(&self) -> TrackerStats {
        self.habits.values().fold(
            TrackerStats {
                habit_count: self.habits.len(),
                ..TrackerStats::default()
            },
            |mut stats, habit| {
                stats.total_streak_days += u64::from(habit.streak());
                stats.total_bricks += habit.bricks().len() as u64;
                stats.longest_streak = stats.longest_streak.max(habit.streak());
                stats
            },
        )
    }

    /// Take all events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a habit with an empty pyramid at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if `name` is blank; nothing is
    /// inserted in that case.
    pub fn create(&mut self, name: &str) -> Result<Habit> {
        let name = Self::validate_name(name)?;
        let id = self.allocate_id();
        let habit = Habit::new(id, name.clone());
        self.habits.insert(id, habit.clone());

        tracing::debug!(habit_id = %id, name = %name, "habit created");
        self.pending_events.push(Event::HabitCreated {
            habit_id: id,
            name,
            at: Utc::now(),
        });
        Ok(habit)
    }

    /// Create a habit whose pyramid already holds `streak` bricks.
    ///
    /// Seeded habits have no check-in date, so the daily tick leaves them
    /// alone until they are first checked in.
    pub fn seed(&mut self, name: &str, streak: u32) -> Result<Habit> {
        let name = Self::validate_name(name)?;
        let id = self.allocate_id();
        let habit = Habit::seeded(id, name.clone(), streak);
        self.habits.insert(id, habit.clone());

        tracing::debug!(habit_id = %id, name = %name, streak, "habit seeded");
        self.pending_events.push(Event::HabitCreated {
            habit_id: id,
            name,
            at: Utc::now(),
        });
        Ok(habit)
    }

    /// Remove a habit. Unknown ids are ignored; returns whether one was removed.
    pub fn delete(&mut self, id: HabitId) -> bool {
        match self.habits.shift_remove(&id) {
            Some(_) => {
                tracing::debug!(habit_id = %id, "habit deleted");
                self.pending_events.push(Event::HabitDeleted {
                    habit_id: id,
                    at: Utc::now(),
                });
                true
            }
            None => false,
        }
    }

    /// Record today's check-in for a habit.
    ///
    /// Returns `None` for an unknown id. A second check-in on the same date
    /// returns the habit unchanged with `applied == false`.
    pub fn check_in(&mut self, id: HabitId, today: NaiveDate) -> Option<CheckinOutcome> {
        let interval = self.milestone_interval;
        let habit = self.habits.get_mut(&id)?;

        if !habit.can_check_in(today) {
            tracing::debug!(habit_id = %id, %today, "already checked in today");
            return Some(CheckinOutcome {
                habit: habit.clone(),
                applied: false,
                milestone: false,
            });
        }

        let brick = habit.lay_brick(today);
        let streak = habit.streak();
        let milestone = streak % interval == 0;
        let snapshot = habit.clone();

        tracing::info!(habit_id = %id, streak, %today, "checked in");
        self.pending_events.push(Event::CheckedIn {
            habit_id: id,
            streak,
            brick,
            on: today,
        });
        if milestone {
            tracing::info!(habit_id = %id, streak, "milestone reached");
            self.pending_events.push(Event::MilestoneReached {
                habit_id: id,
                streak,
                on: today,
            });
        }

        Some(CheckinOutcome {
            habit: snapshot,
            applied: true,
            milestone,
        })
    }

    /// Expire every streak whose last check-in is older than yesterday.
    ///
    /// Returns the ids of the habits that were reset, in collection order.
    pub fn tick_daily_boundary(&mut self, today: NaiveDate) -> Vec<HabitId> {
        let mut expired = Vec::new();

        for habit in self.habits.values_mut() {
            if !habit.is_expired(today) {
                continue;
            }
            let lost_streak = habit.streak();
            let last_checkin = habit.last_checkin();
            habit.reset();

            tracing::info!(
                habit_id = %habit.id(),
                lost_streak,
                ?last_checkin,
                %today,
                "streak expired"
            );
            self.pending_events.push(Event::StreakExpired {
                habit_id: habit.id(),
                lost_streak,
                last_checkin,
                on: today,
            });
            expired.push(habit.id());
        }

        expired
    }

    fn allocate_id(&mut self) -> HabitId {
        let id = HabitId(self.next_id);
        self.next_id += 1;
        id
    }

    fn validate_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(trimmed.to_string())
    }
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_appends_in_order() {
        let mut tracker = StreakTracker::new();
        let a = tracker.create("Read").unwrap();
        let b = tracker.create("  Run  ").unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(b.name(), "Run");
        let names: Vec<_> = tracker.list_habits().iter().map(|h| h.name().to_string()).collect();
        assert_eq!(names, vec!["Read", "Run"]);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut tracker = StreakTracker::new();
        let err = tracker.create("   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyName)));
        assert!(tracker.is_empty());
        assert!(tracker.drain_events().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut tracker = StreakTracker::new();
        let a = tracker.create("Read").unwrap();
        let b = tracker.create("Run").unwrap();

        assert!(tracker.delete(a.id()));
        assert!(!tracker.delete(a.id()));
        assert!(!tracker.delete(HabitId(999)));
        assert_eq!(tracker.list_habits().len(), 1);
        assert_eq!(tracker.list_habits()[0].id(), b.id());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut tracker = StreakTracker::new();
        let a = tracker.create("Read").unwrap();
        tracker.delete(a.id());
        let b = tracker.create("Read").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_check_in_same_day_is_noop() {
        let mut tracker = StreakTracker::new();
        let id = tracker.create("Read").unwrap().id();
        let today = date(2024, 1, 1);

        let first = tracker.check_in(id, today).unwrap();
        assert!(first.applied);
        assert_eq!(first.habit.streak(), 1);

        let second = tracker.check_in(id, today).unwrap();
        assert!(!second.applied);
        assert!(!second.milestone);
        assert_eq!(second.habit, first.habit);
    }

    #[test]
    fn test_check_in_unknown_id() {
        let mut tracker = StreakTracker::new();
        assert!(tracker.check_in(HabitId(7), date(2024, 1, 1)).is_none());
        assert!(!tracker.can_check_in(HabitId(7), date(2024, 1, 1)));
    }

    #[test]
    fn test_milestone_every_fifth_checkin() {
        let mut tracker = StreakTracker::new();
        let id = tracker.create("Read").unwrap().id();
        let start = date(2024, 1, 1);

        let flags: Vec<bool> = (0..15)
            .map(|i| {
                tracker
                    .check_in(id, start + chrono::Duration::days(i))
                    .unwrap()
                    .milestone
            })
            .collect();

        for (i, flag) in flags.iter().enumerate() {
            assert_eq!(*flag, (i + 1) % 5 == 0, "check-in #{}", i + 1);
        }
    }

    #[test]
    fn test_custom_milestone_interval() {
        let mut tracker = StreakTracker::with_milestone_interval(3);
        let id = tracker.create("Read").unwrap().id();
        let start = date(2024, 1, 1);
        tracker.check_in(id, start);
        tracker.check_in(id, start + chrono::Duration::days(1));
        let third = tracker.check_in(id, start + chrono::Duration::days(2)).unwrap();
        assert!(third.milestone);
    }

    #[test]
    fn test_zero_milestone_interval_clamped() {
        let tracker = StreakTracker::with_milestone_interval(0);
        assert_eq!(tracker.milestone_interval(), 1);
    }

    #[test]
    fn test_tick_expires_after_missed_day() {
        let mut tracker = StreakTracker::new();
        let id = tracker.create("Read").unwrap().id();
        tracker.check_in(id, date(2024, 1, 1));
        tracker.check_in(id, date(2024, 1, 2));

        assert!(tracker.tick_daily_boundary(date(2024, 1, 2)).is_empty());
        assert!(tracker.tick_daily_boundary(date(2024, 1, 3)).is_empty());
        assert_eq!(tracker.get(id).unwrap().streak(), 2);

        assert_eq!(tracker.tick_daily_boundary(date(2024, 1, 5)), vec![id]);
        let habit = tracker.get(id).unwrap();
        assert_eq!(habit.streak(), 0);
        assert!(habit.bricks().is_empty());
        assert_eq!(habit.last_checkin(), None);
        assert_eq!(habit.last_brick_added(), None);

        // Second tick does nothing more.
        assert!(tracker.tick_daily_boundary(date(2024, 1, 5)).is_empty());
    }

    #[test]
    fn test_check_in_after_expiry_restarts_at_one() {
        let mut tracker = StreakTracker::new();
        let id = tracker.create("Read").unwrap().id();
        tracker.check_in(id, date(2024, 1, 1));
        tracker.tick_daily_boundary(date(2024, 1, 4));

        let outcome = tracker.check_in(id, date(2024, 1, 4)).unwrap();
        assert_eq!(outcome.habit.bricks(), &[1]);
    }

    #[test]
    fn test_stats_sum_across_habits() {
        let mut tracker = StreakTracker::new();
        let a = tracker.create("Read").unwrap().id();
        tracker.seed("Exercise", 7).unwrap();
        tracker.check_in(a, date(2024, 1, 1));

        let stats = tracker.stats();
        assert_eq!(stats.habit_count, 2);
        assert_eq!(stats.total_streak_days, 8);
        assert_eq!(stats.total_bricks, 8);
        assert_eq!(stats.longest_streak, 7);
    }

    #[test]
    fn test_events_drained_in_order() {
        let mut tracker = StreakTracker::with_milestone_interval(1);
        let id = tracker.create("Read").unwrap().id();
        tracker.check_in(id, date(2024, 1, 1));
        tracker.tick_daily_boundary(date(2024, 1, 9));
        tracker.delete(id);

        let kinds: Vec<&str> = tracker
            .drain_events()
            .iter()
            .map(|e| match e {
                Event::HabitCreated { .. } => "created",
                Event::CheckedIn { .. } => "checked_in",
                Event::MilestoneReached { .. } => "milestone",
                Event::StreakExpired { .. } => "expired",
                Event::HabitDeleted { .. } => "deleted",
            })
            .collect();
        assert_eq!(kinds, vec!["created", "checked_in", "milestone", "expired", "deleted"]);
        assert!(tracker.drain_events().is_empty());
    }

    #[test]
    fn test_from_config_seeds_starters() {
        let mut config = Config::default();
        config.starter_habits = vec![
            StarterHabit { name: "Daily Exercise".into(), streak: 7 },
            StarterHabit { name: "Read 30 minutes".into(), streak: 12 },
        ];

        let seeded = StreakTracker::from_config(&config, true).unwrap();
        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded.list_habits()[1].bricks().len(), 12);

        let bare = StreakTracker::from_config(&config, false).unwrap();
        assert!(bare.is_empty());
    }
}
