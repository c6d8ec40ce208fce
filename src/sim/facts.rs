//! Awareness facts ticker
//!
//! The fact shown next to the playfield rotates on simulated run time, so a
//! paused run keeps its fact and every new run starts from the first one.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const FACTS: [&str; 6] = [
    "1 in 10 people lack access to clean water worldwide.",
    "Women and girls spend 200 million hours a day collecting water.",
    "Clean water can reduce child mortality by 21%.",
    "Charity: Water has funded 186,000+ water projects in 29 countries.",
    "Every $1 invested in water and sanitation yields $4-12 in economic returns.",
    "100% of public donations to Charity: Water fund clean water projects.",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactTicker {
    index: usize,
    /// Seconds the current fact has been shown
    timer: f32,
}

impl FactTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &'static str {
        FACTS[self.index]
    }

    /// Accumulate `dt`; once `interval` is reached the next fact is shown
    /// and its index returned. Leftover time is dropped.
    pub fn advance(&mut self, dt: f32, interval: f32) -> Option<usize> {
        self.timer += dt;
        if self.timer < interval {
            return None;
        }
        self.timer = 0.0;
        self.index = (self.index + 1) % FACTS.len();
        Some(self.index)
    }
}

/// Fact shown on the game-over screen
pub fn random_fact(rng: &mut impl Rng) -> usize {
    rng.random_range(0..FACTS.len())
}
