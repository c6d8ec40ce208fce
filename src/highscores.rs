//! Best time and fastest-runs leaderboard
//!
//! Times are winning run durations in seconds; lower is better.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_ENTRIES;

/// Fastest winning time so far
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestTime(pub Option<f64>);

impl BestTime {
    /// Record `time` if it is strictly faster. Returns whether it was kept.
    pub fn submit(&mut self, time: f64) -> bool {
        match self.0 {
            Some(best) if time >= best => false,
            _ => {
                self.0 = Some(time);
                true
            }
        }
    }

    pub fn get(&self) -> Option<f64> {
        self.0
    }
}

/// Fastest times, sorted ascending, at most `MAX_LEADERBOARD_ENTRIES`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<f64>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, restoring the sorted/capped shape
    pub fn from_entries(mut entries: Vec<f64>) -> Self {
        entries.retain(|t| t.is_finite());
        entries.sort_by(f64::total_cmp);
        entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    /// Check if a time would make the board
    pub fn qualifies(&self, time: f64) -> bool {
        if !time.is_finite() {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().map(|&slowest| time < slowest).unwrap_or(true)
    }

    /// Insert a time. Returns the rank achieved (1-indexed) or None if it
    /// didn't make the board.
    pub fn insert(&mut self, time: f64) -> Option<usize> {
        if !self.qualifies(time) {
            return None;
        }
        // Equal times keep the earlier run ahead
        let pos = self
            .entries
            .iter()
            .position(|&t| time < t)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, time);
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(pos + 1)
    }

    /// Get the fastest time (if any)
    pub fn fastest(&self) -> Option<f64> {
        self.entries.first().copied()
    }
}

/// Everything the storage collaborator persists
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub best_time: BestTime,
    #[serde(default)]
    pub leaderboard: Leaderboard,
}

/// Result of recording a winning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRecord {
    pub new_best: bool,
    pub rank: Option<usize>,
}

impl Records {
    /// Record a winning run's elapsed time
    pub fn record_win(&mut self, elapsed: f64) -> WinRecord {
        WinRecord {
            new_best: self.best_time.submit(elapsed),
            rank: self.leaderboard.insert(elapsed),
        }
    }
}
