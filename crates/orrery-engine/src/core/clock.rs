/// Frame clock — turns host timestamps into per-frame deltas.
///
/// The host passes an absolute time in seconds each tick; the clock
/// returns the elapsed time since the previous tick. Keeping this
/// explicit (rather than reading a wall clock) lets tests drive the
/// simulation with synthetic timestamps.
pub struct FrameClock {
    last: Option<f64>,
}

/// Cap on a single delta. A backgrounded tab stops animation-frame
/// callbacks entirely; the first frame after it returns must not carry
/// the whole gap as one step.
const MAX_DELTA: f32 = 0.25;

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Elapsed seconds since the previous call. The first call after
    /// construction or `reset` returns 0.0.
    pub fn delta(&mut self, now_seconds: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now_seconds - last) as f32).clamp(0.0, MAX_DELTA),
            None => 0.0,
        };
        self.last = Some(now_seconds);
        dt
    }

    /// Forget the previous timestamp, so the next delta is 0.0.
    /// Called on resume so paused time is not replayed.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
