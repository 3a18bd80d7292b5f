use std::time::{Duration, Instant};

/// Interval between render ticks (~66 Hz).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(15);

/// Fixed-interval tick scheduler.
///
/// Deadlines advance by exactly one interval per fired tick, independent of
/// how long the tick took. A late poll fires once and leaves the next
/// deadline in the past, so missed ticks run back to back rather than being
/// merged.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    interval: Duration,
    deadline: Instant,
    fired: u64,
}

impl TickScheduler {
    /// First tick is due immediately at `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            deadline: start,
            fired: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick becomes due.
    pub fn next_deadline(&self) -> Instant {
        self.deadline
    }

    /// Number of ticks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns true and schedules the following tick if one is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }

        self.deadline += self.interval;
        self.fired += 1;
        true
    }

    /// Fires every tick due at `now` and returns how many there were.
    pub fn poll_due(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.poll(now) {
            due += 1;
        }
        due
    }
}

/// Frame rate estimate accumulated over a reporting window.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    window: f32,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(window_secs: f32) -> Self {
        Self {
            window: window_secs,
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Records one frame; returns the new estimate once per window.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.window {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
