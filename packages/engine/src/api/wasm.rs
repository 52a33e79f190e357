use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::core::random::MathRandom;
use crate::domain::settings::PipeSettings;
use crate::render::canvas::DomSurfaceFactory;
use crate::render::{PipeScene, SurfaceFactory};
use crate::simulation::PerfStats;

use super::frame_loop::FrameLoop;
use super::scheduler::{FrameScheduler, RafScheduler};

type DomScene = PipeScene<DomSurfaceFactory>;

fn viewport(window: &Window) -> Result<(u32, u32), String> {
    let width = window
        .inner_width()
        .map_err(|e| format!("innerWidth unavailable: {:?}", e))?
        .as_f64()
        .ok_or_else(|| "innerWidth is not a number".to_string())?;
    let height = window
        .inner_height()
        .map_err(|e| format!("innerHeight unavailable: {:?}", e))?
        .as_f64()
        .ok_or_else(|| "innerHeight is not a number".to_string())?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

/// Stop, rebuild the scene for the new size, then resume on a new generation.
///
/// A running loop is resumed even when the resize fails; the old scene is
/// still intact then.
pub(crate) fn apply_resize<F, S>(
    scene: &RefCell<PipeScene<F>>,
    frame_loop: &FrameLoop<S>,
    width: u32,
    height: u32,
) -> Result<(), String>
where
    F: SurfaceFactory,
    S: FrameScheduler + 'static,
{
    let was_running = frame_loop.is_running();
    frame_loop.stop();
    let resized = scene.borrow_mut().resize(width, height);
    if was_running {
        frame_loop.start()?;
    }
    resized
}

/// Flow pipes mounted into a page container, following the viewport size
#[wasm_bindgen]
pub struct PipeAnimation {
    scene: Rc<RefCell<DomScene>>,
    frame_loop: Rc<FrameLoop<RafScheduler>>,
    window: Window,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl PipeAnimation {
    /// Mount into the element matched by `container_selector`. Does not start drawing.
    #[wasm_bindgen(constructor)]
    pub fn new(container_selector: &str, settings_json: Option<String>) -> Result<PipeAnimation, JsValue> {
        Self::mount(container_selector, settings_json.as_deref()).map_err(|e| JsValue::from_str(&e))
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.frame_loop.start().map_err(|e| JsValue::from_str(&e))
    }

    pub fn stop(&self) {
        self.frame_loop.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool { self.frame_loop.is_running() }

    /// Same path the window `resize` listener takes, with explicit dimensions
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        apply_resize(&self.scene, &self.frame_loop, width, height).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.scene.borrow().sim().tick() }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> u64 { self.frame_loop.frames() }

    #[wasm_bindgen(getter)]
    pub fn pipe_count(&self) -> usize { self.scene.borrow().sim().pipe_count() }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.scene.borrow().width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.scene.borrow().height() }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&self, enabled: bool) {
        self.scene.borrow_mut().sim_mut().enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.scene.borrow().sim().get_perf_stats()
    }

    pub fn settings_json(&self) -> String {
        self.scene.borrow().sim().settings().to_json()
    }

    /// Get pointer to the flat pipe pool (8 f32 per pipe)
    pub fn pipes_ptr(&self) -> *const f32 {
        self.scene.borrow().sim().pipes_ptr()
    }

    /// Pool length in f32 elements
    pub fn pipes_len(&self) -> usize {
        self.scene.borrow().sim().pipes_len()
    }
}

impl PipeAnimation {
    pub fn mount(container_selector: &str, settings_json: Option<&str>) -> Result<Self, String> {
        let settings = match settings_json {
            Some(json) => PipeSettings::from_json(json)?,
            None => PipeSettings::default(),
        };

        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        let (width, height) = viewport(&window)?;
        let factory = DomSurfaceFactory::from_selector(container_selector)?;

        let scene = Rc::new(RefCell::new(PipeScene::new(
            factory,
            settings,
            width,
            height,
            Box::new(MathRandom),
        )?));

        let body_scene = scene.clone();
        let frame_loop = Rc::new(FrameLoop::new(RafScheduler::new()?, move || {
            body_scene.borrow_mut().frame()
        }));

        let mut animation = Self { scene, frame_loop, window, on_resize: None };
        animation.listen_for_resize()?;
        Ok(animation)
    }

    fn listen_for_resize(&mut self) -> Result<(), String> {
        let scene = self.scene.clone();
        let frame_loop = self.frame_loop.clone();
        let window = self.window.clone();

        let closure = Closure::wrap(Box::new(move || {
            let result = viewport(&window)
                .and_then(|(w, h)| apply_resize(&scene, &frame_loop, w, h));
            if let Err(e) = result {
                warn!("flow pipes: resize failed: {}", e);
            }
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| format!("failed to listen for resize: {:?}", e))?;
        self.on_resize = Some(closure);
        Ok(())
    }
}

impl Drop for PipeAnimation {
    fn drop(&mut self) {
        self.frame_loop.stop();
        if let Some(closure) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        if let Ok(mut scene) = self.scene.try_borrow_mut() {
            scene.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scheduler::ManualScheduler;
    use crate::core::random::Xorshift32;
    use crate::render::headless::HeadlessFactory;

    fn headless_scene() -> Rc<RefCell<PipeScene<HeadlessFactory>>> {
        let scene = PipeScene::new(
            HeadlessFactory::new(),
            PipeSettings::default(),
            800,
            600,
            Box::new(Xorshift32::new(7)),
        )
        .unwrap();
        Rc::new(RefCell::new(scene))
    }

    fn driven_loop(
        scene: &Rc<RefCell<PipeScene<HeadlessFactory>>>,
        scheduler: &ManualScheduler,
    ) -> FrameLoop<ManualScheduler> {
        let body_scene = scene.clone();
        FrameLoop::new(scheduler.clone(), move || body_scene.borrow_mut().frame())
    }

    #[test]
    fn resize_swaps_surfaces_and_resumes() {
        let scene = headless_scene();
        let scheduler = ManualScheduler::new();
        let frame_loop = driven_loop(&scene, &scheduler);
        frame_loop.start().unwrap();
        scheduler.run_frame();

        apply_resize(&scene, &frame_loop, 1024, 768).unwrap();

        assert!(frame_loop.is_running());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scene.borrow().width(), 1024);
        assert_eq!(scene.borrow().sim().tick(), 0);
    }

    #[test]
    fn failed_resize_keeps_the_loop_running() {
        let scene = headless_scene();
        let scheduler = ManualScheduler::new();
        let frame_loop = driven_loop(&scene, &scheduler);
        frame_loop.start().unwrap();
        scheduler.run_frame();

        scene.borrow_mut().factory_mut().refuse_create(true);
        let err = apply_resize(&scene, &frame_loop, 1024, 768).unwrap_err();
        assert!(err.contains("refused"), "{}", err);

        assert!(frame_loop.is_running());
        assert_eq!(scene.borrow().width(), 800);
        scheduler.run_frame();
        scheduler.run_frame();
        assert_eq!(frame_loop.frames(), 3);
        assert_eq!(scene.borrow().sim().tick(), 3);
    }

    #[test]
    fn failed_resize_leaves_a_stopped_loop_stopped() {
        let scene = headless_scene();
        let scheduler = ManualScheduler::new();
        let frame_loop = driven_loop(&scene, &scheduler);

        scene.borrow_mut().factory_mut().refuse_create(true);
        assert!(apply_resize(&scene, &frame_loop, 1024, 768).is_err());
        assert!(!frame_loop.is_running());
        assert_eq!(scheduler.pending(), 0);
    }
}
