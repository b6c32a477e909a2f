use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    #[serde(rename = "width")]
    pub w: u32,
    #[serde(rename = "height")]
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    /// Both orientations, original first. Squares still yield two entries.
    pub fn orientations(&self) -> [Self; 2] {
        [*self, self.rotated()]
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A committed piece: its final orientation anchored at the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    #[serde(flatten)]
    pub rect: Rect,
    pub rotated: bool,
}

impl Placement {
    pub fn right(&self) -> u32 {
        self.x + self.rect.w
    }

    pub fn top(&self) -> u32 {
        self.y + self.rect.h
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.top() && other.y < self.top()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Calls into the skyline, one per piece orientation tried.
    pub attempts: u64,
    pub placed: u64,
    pub backtracks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Solved { placements: Vec<Placement> },
    Unsolvable,
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub board: Rect,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub stats: SearchStats,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved { .. })
    }

    pub fn placements(&self) -> &[Placement] {
        match &self.outcome {
            Outcome::Solved { placements } => placements,
            Outcome::Unsolvable => &[],
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(millis(*elapsed))
}
