//! Pyramid layout: where each numbered brick sits.
//!
//! Bricks 1 through 17 follow a hand-placed masonry pattern in which each
//! pair on a lower row supports one brick above, offset by half a unit.
//! From brick 18 on a generic row/column formula takes over. The two regimes
//! do not line up visually at the boundary; that discontinuity is kept as-is.
//!
//! Row 0 is the base. `compute` emits rows from the highest row index down,
//! so a renderer drawing top to bottom ends with the base.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default period of highlighted bricks (every 7th brick).
pub const DEFAULT_HIGHLIGHT_INTERVAL: u32 = 7;

/// Highest brick number covered by the hand-placed table.
pub const HAND_PLACED_BRICKS: u32 = 17;

/// (row, column) for bricks 1..=17, indexed by `brick - 1`.
const HAND_PLACED: [(u32, f64); HAND_PLACED_BRICKS as usize] = [
    (0, 0.0),
    (0, 1.0),
    (1, 0.5),
    (0, 2.0),
    (1, 1.5),
    (0, 3.0),
    (1, 2.5),
    (0, 4.0),
    (1, 3.5),
    (2, 1.0),
    (0, 5.0),
    (1, 4.5),
    (2, 2.0),
    (0, 6.0),
    (1, 5.5),
    (2, 3.0),
    (3, 1.5),
];

/// Position of one brick in the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickPlacement {
    pub brick: u32,
    pub row: u32,
    /// Horizontal slot; half-unit values sit between two bricks of the row below.
    pub column: f64,
}

/// A placement plus the per-brick emphasis flags a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBrick {
    #[serde(flatten)]
    pub placement: BrickPlacement,
    /// Brick was laid by the most recent check-in.
    pub is_new: bool,
    /// Brick number is a multiple of the highlight interval.
    pub is_highlight: bool,
}

pub struct PyramidLayout;

impl PyramidLayout {
    /// Placement of a single brick (1-based).
    pub fn place(brick: u32) -> BrickPlacement {
        if (1..=HAND_PLACED_BRICKS).contains(&brick) {
            let (row, column) = HAND_PLACED[(brick - 1) as usize];
            return BrickPlacement { brick, row, column };
        }

        let n = u64::from(brick.max(1));
        let row_size = isqrt(2 * n).max(1);
        BrickPlacement {
            brick,
            row: ((n - 1) / row_size) as u32,
            column: ((n - 1) % row_size) as f64,
        }
    }

    /// Lay out bricks `1..=count` as rows, highest row first, each row
    /// ordered left to right.
    pub fn compute(count: u32) -> Vec<Vec<BrickPlacement>> {
        let mut rows: BTreeMap<u32, Vec<BrickPlacement>> = BTreeMap::new();
        for brick in 1..=count {
            let placement = Self::place(brick);
            rows.entry(placement.row).or_default().push(placement);
        }

        rows.into_values()
            .rev()
            .map(|mut row| {
                row.sort_by(|a, b| a.column.total_cmp(&b.column));
                row
            })
            .collect()
    }

    /// `compute` for counts arriving from an untyped boundary.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeBrickCount` for negative input and
    /// `ValidationError::InvalidValue` for counts beyond `u32::MAX`.
    pub fn try_compute(count: i64) -> Result<Vec<Vec<BrickPlacement>>, ValidationError> {
        if count < 0 {
            return Err(ValidationError::NegativeBrickCount(count));
        }
        let count = u32::try_from(count).map_err(|_| ValidationError::InvalidValue {
            field: "brick_count".to_string(),
            message: format!("{count} exceeds the maximum of {}", u32::MAX),
        })?;
        Ok(Self::compute(count))
    }

    /// Flag the newest and highlighted bricks of a computed layout.
    pub fn annotate(
        rows: Vec<Vec<BrickPlacement>>,
        last_brick_added: Option<u32>,
        highlight_interval: u32,
    ) -> Vec<Vec<AnnotatedBrick>> {
        let interval = highlight_interval.max(1);
        rows.into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|placement| AnnotatedBrick {
                        placement,
                        is_new: last_brick_added == Some(placement.brick),
                        is_highlight: placement.brick % interval == 0,
                    })
                    .collect()
            })
            .collect()
    }
}

/// Integer square root, floor.
fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}
