use serde::{Deserialize, Serialize};

use crate::smooth::lerp;

/// Scalar that ramps toward a target over a fixed duration.
///
/// Retargeting mid-flight restarts from wherever the value currently is, so
/// the output never jumps. One instance is one effect channel.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct TransientEffect {
    pub start: f32,
    pub target: f32,
    /// Last sampled value
    pub current: f32,
    pub elapsed: f32,
    pub duration: f32,
    pub running: bool,
}

impl TransientEffect {
    pub fn new(value: f32, duration: f32) -> Self {
        Self {
            start: value,
            target: value,
            current: value,
            elapsed: 0.,
            duration: duration.max(0.001),
            running: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    /// Begin ramping toward `target`, superseding any transition in flight
    pub fn start_transition(&mut self, target: f32) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.;
        self.running = true;
    }

    /// Sample at the current elapsed time, then advance by `dt`.
    ///
    /// The tick after elapsed reaches the duration lands exactly on the
    /// target and finishes; ticks after that are no-ops.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.running { return self.current; }

        if self.elapsed >= self.duration {
            self.start = self.target;
            self.current = self.target;
            self.running = false;
        } else {
            self.current = lerp(self.start, self.target, self.elapsed / self.duration);
            self.elapsed += dt;
        }
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for TransientEffect {
    fn default() -> Self {
        Self::new(0., 0.5)
    }
}
