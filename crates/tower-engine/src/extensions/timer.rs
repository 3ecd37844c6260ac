// extensions/timer.rs
//
// Countdown timers advanced by the fixed step, for press-and-hold and periodic work.

/// One-shot timer. `tick` reports `true` exactly once, on the step it runs out.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start with `seconds` left.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = Some(seconds);
    }

    /// Stop without firing. Safe to call when not running.
    pub fn stop(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(left) = self.remaining.as_mut() else {
            return false;
        };
        *left -= dt;
        if *left <= 0.0 {
            self.remaining = None;
            true
        } else {
            false
        }
    }
}

/// Repeating timer.
#[derive(Debug, Clone)]
pub struct Interval {
    period: f32,
    elapsed: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self { period, elapsed: 0.0 }
    }

    /// Returns how many periods completed during this step (usually 0 or 1).
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
