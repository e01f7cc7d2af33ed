pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use orrery_engine::bridge::protocol::{HEADER_FLOATS, INSTANCE_FLOATS};
use orrery_engine::catalog;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. No-op (returning the default) when
/// `scene_init` has not been called or the scene was disposed, so the host
/// can race teardown against a trailing animation frame without crashing.
fn with_runner<R: Default>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => f(runner),
            None => R::default(),
        }
    })
}

/// Create the scene and start the animation loop.
#[wasm_bindgen]
pub fn scene_init(width: f32, height: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = SceneRunner::new();
    runner.init(width, height);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("orrery: initialized");
}

/// Advance one frame. `now_ms` is the `requestAnimationFrame` timestamp.
#[wasm_bindgen]
pub fn scene_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

#[wasm_bindgen]
pub fn scene_pause() {
    with_runner(|r| r.pause());
}

#[wasm_bindgen]
pub fn scene_resume() {
    with_runner(|r| r.resume());
}

#[wasm_bindgen]
pub fn scene_set_orbit_speed(name: &str, speed: f32) {
    with_runner(|r| r.set_orbit_speed(name, speed));
}

#[wasm_bindgen]
pub fn scene_toggle_background(is_dark: bool) {
    with_runner(|r| r.toggle_background(is_dark));
}

#[wasm_bindgen]
pub fn scene_zoom(factor: f32) {
    with_runner(|r| r.zoom_camera(factor));
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

/// Tear down the scene and drop the runner.
#[wasm_bindgen]
pub fn scene_dispose() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.dispose();
        }
    });
}

#[wasm_bindgen]
pub fn scene_is_running() -> bool {
    with_runner(|r| r.is_running())
}

// ---- Data accessors ----

/// Planet catalog as JSON, for building the host-side controls UI.
#[wasm_bindgen]
pub fn get_catalog_json() -> String {
    serde_json::to_string(&catalog::planets()).unwrap_or_else(|_| "[]".to_string())
}

/// Texture file names referenced by instance `texture` slots, as JSON.
#[wasm_bindgen]
pub fn get_texture_table_json() -> String {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|r| serde_json::to_string(r.texture_table()).ok())
            .unwrap_or_else(|| "[]".to_string())
    })
}

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|r| r.frame_ptr())
            .unwrap_or(std::ptr::null())
    })
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len())
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_header_floats() -> u32 {
    HEADER_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    INSTANCE_FLOATS as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_json_lists_all_planets() {
        let json = get_catalog_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let list = parsed.as_array().unwrap();
        assert_eq!(list.len(), catalog::PLANET_COUNT);
        assert_eq!(list[0]["name"], "mercury");
        assert_eq!(list[5]["name"], "saturn");
        assert!(list[5]["ring"].is_object());
        assert!(list[0]["ring"].is_null());
    }

    #[test]
    fn layout_constants_match_engine_protocol() {
        assert_eq!(get_header_floats(), 16);
        assert_eq!(get_instance_floats(), 20);
    }
}
