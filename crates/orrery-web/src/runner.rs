use orrery_engine::{FrameBackend, FrameClock, SceneManager};

/// Owns the scene manager and the host-driven frame clock.
///
/// The JS host creates one `SceneRunner` (through the `thread_local!` in
/// `lib.rs`, because wasm-bindgen cannot export structs holding generics)
/// and drives it from `requestAnimationFrame` with millisecond timestamps.
pub struct SceneRunner {
    manager: SceneManager<FrameBackend>,
    clock: FrameClock,
}

impl SceneRunner {
    pub fn new() -> Self {
        Self {
            manager: SceneManager::new(FrameBackend::new()),
            clock: FrameClock::new(),
        }
    }

    /// Build the scene and start the loop. Call once after construction.
    pub fn init(&mut self, width: f32, height: f32) {
        self.manager.init(width, height);
        // The page mounts against the dark theme.
        self.manager.toggle_background(true);
    }

    /// Advance one frame from a host timestamp in milliseconds.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = self.clock.delta(now_ms / 1000.0);
        self.manager.tick(dt);
    }

    pub fn pause(&mut self) {
        self.manager.pause();
    }

    /// Resume the loop. Resets the clock so time spent paused is not
    /// replayed as one giant delta on the next frame.
    pub fn resume(&mut self) {
        self.clock.reset();
        self.manager.resume();
    }

    pub fn set_orbit_speed(&mut self, name: &str, speed: f32) {
        self.manager.set_orbit_speed(name, speed);
    }

    pub fn toggle_background(&mut self, is_dark: bool) {
        self.manager.toggle_background(is_dark);
    }

    pub fn zoom_camera(&mut self, factor: f32) {
        self.manager.zoom_camera(factor);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.manager.resize(width, height);
    }

    /// Release all GPU-side handles and clear the scene.
    pub fn dispose(&mut self) {
        self.manager.dispose();
        self.clock.reset();
    }

    pub fn is_running(&self) -> bool {
        self.manager.is_running()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.manager.backend().frame_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.manager.backend().frame_len()
    }

    pub fn max_instances(&self) -> u32 {
        self.manager.backend().max_instances()
    }

    pub fn texture_table(&self) -> &[String] {
        self.manager.backend().texture_table()
    }
}

impl Default for SceneRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::catalog;

    #[test]
    fn init_builds_scene_and_starts_dark() {
        let mut runner = SceneRunner::new();
        runner.init(800.0, 600.0);
        assert!(runner.is_running());
        assert!(runner.frame_len() > 0);

        // Clear color only lands in the header after a submit.
        runner.tick(0.0);
        runner.tick(16.0);
        let header = unsafe {
            std::slice::from_raw_parts(runner.frame_ptr(), runner.frame_len() as usize)
        };
        assert_eq!(header[orrery_engine::bridge::protocol::HEADER_CLEAR_R], 0.0);
        assert_eq!(header[orrery_engine::bridge::protocol::HEADER_CLEAR_G], 0.0);
        assert_eq!(header[orrery_engine::bridge::protocol::HEADER_CLEAR_B], 0.0);
    }

    #[test]
    fn tick_converts_milliseconds_to_seconds() {
        let mut runner = SceneRunner::new();
        runner.init(800.0, 600.0);
        runner.tick(1000.0);
        let before = runner
            .manager
            .planet("venus")
            .map(|p| p.current_angle)
            .unwrap_or(0.0);
        runner.tick(1100.0); // 100 ms later
        let after = runner.manager.planet("venus").unwrap().current_angle;
        let spec = catalog::get("venus").unwrap();
        let expected = spec.orbit_speed * 0.1 * catalog::ORBIT_TIME_SCALE;
        assert!((after - before - expected).abs() < 1e-4);
    }

    #[test]
    fn resume_resets_clock_so_pause_time_is_not_replayed() {
        let mut runner = SceneRunner::new();
        runner.init(800.0, 600.0);
        runner.tick(0.0);
        runner.tick(16.0);
        runner.pause();
        let frozen = runner.manager.planet("earth").unwrap().current_angle;

        // A long pause, then resume. The first tick after resume must see
        // a zero delta, not the full pause duration.
        runner.resume();
        runner.tick(60_000.0);
        let after = runner.manager.planet("earth").unwrap().current_angle;
        assert_eq!(frozen, after);
    }

    #[test]
    fn dispose_is_safe_and_repeatable() {
        let mut runner = SceneRunner::new();
        runner.dispose();
        runner.init(800.0, 600.0);
        runner.dispose();
        runner.dispose();
        assert!(!runner.is_running());
    }
}
