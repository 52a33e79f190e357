//! Browser tests: `wasm-pack test --headless --firefox packages/engine`
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use flow_pipes_engine::api::frame_loop::FrameLoop;
use flow_pipes_engine::api::scheduler::RafScheduler;
use flow_pipes_engine::PipeAnimation;

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("div").unwrap();
    el.set_id(id);
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn mounts_exactly_one_canvas() {
    let el = container("pipes-mount");
    let animation = PipeAnimation::new("#pipes-mount", None).unwrap();

    assert_eq!(el.child_element_count(), 1);
    assert_eq!(animation.pipe_count(), 30);
    assert!(!animation.is_running());
}

#[wasm_bindgen_test]
fn resize_keeps_one_canvas_with_new_pool() {
    let el = container("pipes-resize");
    let animation = PipeAnimation::new("#pipes-resize", None).unwrap();

    animation.resize(1024, 768).unwrap();

    assert_eq!(el.child_element_count(), 1);
    assert_eq!(animation.width(), 1024);
    assert_eq!(animation.height(), 768);
    assert_eq!(animation.pipe_count(), 30);
    assert_eq!(animation.tick(), 0);
}

#[wasm_bindgen_test]
fn drop_removes_canvas() {
    let el = container("pipes-drop");
    let animation = PipeAnimation::new("#pipes-drop", None).unwrap();
    animation.start().unwrap();
    drop(animation);

    assert_eq!(el.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn missing_container_is_an_error() {
    assert!(PipeAnimation::new("#does-not-exist", None).is_err());
}

#[wasm_bindgen_test]
fn stopping_releases_frame_callbacks() {
    let frame_loop = FrameLoop::new(RafScheduler::new().unwrap(), || Ok(()));
    for _ in 0..50 {
        frame_loop.start().unwrap();
        frame_loop.stop();
    }
    assert_eq!(frame_loop.scheduler().pending(), 0);

    frame_loop.start().unwrap();
    assert_eq!(frame_loop.scheduler().pending(), 1);
}
