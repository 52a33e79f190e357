//! Flow Pipes Engine - animated pipe trails rendered to canvas from WASM
//!
//! Architecture:
//! - core/        - Slot access, math, randomness, console logging
//! - domain/      - Pipe record layout and settings
//! - spatial/     - Flat pipe pool
//! - simulation/  - Per-frame pipe update
//! - render/      - Surfaces, compositing, canvas pair
//! - api/         - Frame loop and JS-facing API

// Macros (fast!, log!, warn!) must be declared before the modules that use them
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod simulation;
pub mod render;
pub mod api;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    log!("🦀 Flow Pipes WASM Engine initialized!");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::PipeAnimation;
pub use domain::pipe::Pipe;
pub use domain::settings::PipeSettings;
pub use simulation::{PerfStats, PipeSimulationCore};

thread_local! {
    // The page-owned animation started by `run`
    static ACTIVE: RefCell<Option<PipeAnimation>> = RefCell::new(None);
}

/// Mount into `container_selector` and start drawing immediately
#[wasm_bindgen]
pub fn mount_pipes(container_selector: &str, settings_json: Option<String>) -> Result<PipeAnimation, JsValue> {
    let animation = PipeAnimation::new(container_selector, settings_json)?;
    animation.start()?;
    Ok(animation)
}

/// Page entry point: mount once the document content is ready.
///
/// Calling again replaces the running animation.
#[wasm_bindgen]
pub fn run(container_selector: String) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    if is_loading(&document.ready_state()) {
        let on_ready = Closure::once(move || {
            if let Err(e) = mount_active(&container_selector) {
                warn!("flow pipes: mount failed: {}", e);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        Ok(())
    } else {
        mount_active(&container_selector).map_err(|e| JsValue::from_str(&e))
    }
}

/// Stop and unmount the animation started by `run`
#[wasm_bindgen]
pub fn stop_pipes() {
    let previous = ACTIVE.with(|slot| slot.borrow_mut().take());
    drop(previous);
}

// `Document.readyState` is one of "loading", "interactive", "complete"
fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn mount_active(container_selector: &str) -> Result<(), String> {
    stop_pipes();
    let animation = PipeAnimation::mount(container_selector, None)?;
    animation.start().map_err(|e| format!("{:?}", e))?;
    ACTIVE.with(|slot| *slot.borrow_mut() = Some(animation));
    Ok(())
}
