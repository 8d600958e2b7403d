//! The habit record ("pyramid").

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier assigned to a habit when it is created. Never reused within
/// one tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub u64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(HabitId)
            .map_err(|e| ValidationError::InvalidValue {
                field: "habit_id".to_string(),
                message: format!("'{s}' is not a habit id: {e}"),
            })
    }
}

/// A tracked habit and its current streak.
///
/// `bricks` is always exactly `[1, 2, ..., streak]`. Fields are private so
/// the only way to change a habit is through the tracker's check-in and
/// expiry rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Habit {
    id: HabitId,
    name: String,
    streak: u32,
    bricks: Vec<u32>,
    last_checkin: Option<NaiveDate>,
    last_brick_added: Option<u32>,
}

impl Habit {
    pub(crate) fn new(id: HabitId, name: String) -> Self {
        Self {
            id,
            name,
            streak: 0,
            bricks: Vec::new(),
            last_checkin: None,
            last_brick_added: None,
        }
    }

    /// A habit that starts with `streak` bricks already laid but no check-in
    /// date on record.
    pub(crate) fn seeded(id: HabitId, name: String, streak: u32) -> Self {
        Self {
            id,
            name,
            streak,
            bricks: (1..=streak).collect(),
            last_checkin: None,
            last_brick_added: None,
        }
    }

    pub fn id(&self) -> HabitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn bricks(&self) -> &[u32] {
        &self.bricks
    }

    pub fn brick_count(&self) -> u32 {
        self.streak
    }

    pub fn last_checkin(&self) -> Option<NaiveDate> {
        self.last_checkin
    }

    /// Brick appended by the most recent check-in, for "just added" emphasis.
    pub fn last_brick_added(&self) -> Option<u32> {
        self.last_brick_added
    }

    /// Whether a check-in on `today` would add a brick.
    pub fn can_check_in(&self, today: NaiveDate) -> bool {
        self.last_checkin != Some(today)
    }

    /// Lay the next brick. Caller has already ruled out a same-day repeat.
    pub(crate) fn lay_brick(&mut self, today: NaiveDate) -> u32 {
        self.streak += 1;
        self.bricks.push(self.streak);
        self.last_checkin = Some(today);
        self.last_brick_added = Some(self.streak);
        self.streak
    }

    /// Whether the streak has lapsed as of `today`.
    ///
    /// Today and yesterday both count as current. A habit that has never been
    /// checked in (including seeded ones) does not lapse.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        if self.streak == 0 {
            return false;
        }
        match self.last_checkin {
            Some(last) => last != today && last != crate::clock::previous_day(today),
            None => false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.streak = 0;
        self.bricks.clear();
        self.last_checkin = None;
        self.last_brick_added = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn new_habit_is_empty() {
        let h = Habit::new(HabitId(1), "Read".into());
        assert_eq!(h.streak(), 0);
        assert!(h.bricks().is_empty());
        assert_eq!(h.last_checkin(), None);
        assert_eq!(h.last_brick_added(), None);
    }

    #[test]
    fn lay_brick_keeps_bricks_positional() {
        let mut h = Habit::new(HabitId(1), "Read".into());
        assert_eq!(h.lay_brick(day(1)), 1);
        assert_eq!(h.lay_brick(day(2)), 2);
        assert_eq!(h.bricks(), &[1, 2]);
        assert_eq!(h.last_brick_added(), Some(2));
        assert_eq!(h.last_checkin(), Some(day(2)));
    }

    #[test]
    fn expiry_tolerates_one_missed_day() {
        let mut h = Habit::new(HabitId(1), "Read".into());
        h.lay_brick(day(10));
        assert!(!h.is_expired(day(10)));
        assert!(!h.is_expired(day(11)));
        assert!(h.is_expired(day(12)));
    }

    #[test]
    fn seeded_habit_never_expires_before_first_checkin() {
        let h = Habit::seeded(HabitId(1), "Daily Exercise".into(), 7);
        assert_eq!(h.bricks(), &[1, 2, 3, 4, 5, 6, 7]);
        assert!(!h.is_expired(day(30)));
    }

    #[test]
    fn habit_id_parses_from_str() {
        assert_eq!("42".parse::<HabitId>().unwrap(), HabitId(42));
        assert!("abc".parse::<HabitId>().is_err());
    }
}
