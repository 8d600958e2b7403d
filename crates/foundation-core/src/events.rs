use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::HabitId;

/// Every state change in the tracker produces an Event.
/// The host drains them after each operation to drive notifications and UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    HabitCreated {
        habit_id: HabitId,
        name: String,
        at: DateTime<Utc>,
    },
    HabitDeleted {
        habit_id: HabitId,
        at: DateTime<Utc>,
    },
    CheckedIn {
        habit_id: HabitId,
        streak: u32,
        brick: u32,
        on: NaiveDate,
    },
    /// Streak reached a multiple of the milestone interval (celebration).
    MilestoneReached {
        habit_id: HabitId,
        streak: u32,
        on: NaiveDate,
    },
    /// A missed day cleared the streak during a daily tick.
    StreakExpired {
        habit_id: HabitId,
        lost_streak: u32,
        last_checkin: Option<NaiveDate>,
        on: NaiveDate,
    },
}

impl Event {
    pub fn habit_id(&self) -> HabitId {
        match self {
            Event::HabitCreated { habit_id, .. }
            | Event::HabitDeleted { habit_id, .. }
            | Event::CheckedIn { habit_id, .. }
            | Event::MilestoneReached { habit_id, .. }
            | Event::StreakExpired { habit_id, .. } => *habit_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::CheckedIn {
            habit_id: HabitId(3),
            streak: 2,
            brick: 2,
            on: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CheckedIn");
        assert_eq!(json["habit_id"], 3);
        assert_eq!(json["on"], "2024-01-02");
    }
}
