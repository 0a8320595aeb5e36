use instant::Instant;

/// Monotonic run clock. Every component is driven from the pair it returns,
/// so a frame sees one consistent `(elapsed, dt)` sample.
pub struct Clock {
    start: Instant,
    last: Instant,
}

// Frames stalled longer than this (tab hidden, window dragged) advance by the
// cap instead, so stream particles do not teleport through the recycle band.
const MAX_FRAME_DT: f32 = 0.25;

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start: now, last: now }
    }

    /// Sample the clock at the top of a frame.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32().min(MAX_FRAME_DT);
        self.last = now;
        (now.duration_since(self.start).as_secs_f32(), dt)
    }

    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
