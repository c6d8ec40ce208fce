//! Frame scheduling
//!
//! Stands in for the display-refresh callback. While stopped no frames are
//! produced at all, and resuming re-baselines so the paused wall time never
//! reaches the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, NOMINAL_FRAME_DT};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    /// Timestamp (seconds) of the previous frame, `None` while stopped
    last_frame: Option<f64>,
    running: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin scheduling frames; the first frame measures from `now`
    pub fn start(&mut self, now: f64) {
        self.running = true;
        self.last_frame = Some(now);
    }

    /// Stop scheduling frames
    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame = None;
    }

    /// Continue after a stop; the baseline moves to `now`
    pub fn resume(&mut self, now: f64) {
        self.start(now);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frame callback: elapsed seconds since the previous frame, or `None`
    /// when stopped. Non-positive deltas fall back to the nominal frame time.
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_frame {
            Some(last) if now > last => ((now - last) as f32).min(MAX_FRAME_DT),
            _ => NOMINAL_FRAME_DT,
        };
        self.last_frame = Some(now);
        Some(dt)
    }
}
