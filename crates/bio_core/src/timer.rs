//! Clock and timers advanced by the scheduler tick

/// Logical simulation clock. Only advances when the scheduler ticks it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now: f32,
}

impl SimClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time
    #[inline]
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Advance by `dt` (negative deltas are ignored)
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.now += dt.max(0.0);
        self.now
    }
}

/// Repeating interval timer.
///
/// Accumulates elapsed time and reports how many whole intervals completed,
/// so a long frame never drops a regen tick or a volley.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    interval: f32,
    elapsed: f32,
}

impl Timer {
    /// Create a timer that fires every `interval` time units
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Current interval
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Change the interval without losing accumulated time
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval.max(0.0);
    }

    /// Time accumulated towards the next firing
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance and return the number of completed intervals.
    ///
    /// A zero interval never fires; it would otherwise fire without bound.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt.max(0.0);
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Restart from zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// One-shot delay
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delay {
    remaining: f32,
}

impl Delay {
    /// Create a delay that elapses after `duration`
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// Already-elapsed delay
    pub fn elapsed() -> Self {
        Self { remaining: 0.0 }
    }

    /// Advance; returns true once the delay has run out
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.is_done()
    }

    /// Whether the delay has run out
    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Time left
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Cooldown measured against the simulation clock.
///
/// Ready when `now - last_use >= duration`; a cooldown that has never been
/// used is ready immediately.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    last_use: Option<f32>,
}

impl Cooldown {
    /// Create a cooldown that is ready immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cooldown of length `duration` has elapsed at `now`
    pub fn is_ready(&self, now: f32, duration: f32) -> bool {
        match self.last_use {
            Some(last) => now - last >= duration.max(0.0),
            None => true,
        }
    }

    /// Re-arm at `now`
    pub fn trigger(&mut self, now: f32) {
        self.last_use = Some(now);
    }

    /// Time of the last use
    pub fn last_use(&self) -> Option<f32> {
        self.last_use
    }
}
