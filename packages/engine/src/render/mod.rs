//! Rendering pipeline
//!
//! - surface/   - what a 2D drawing target must provide
//! - color      - hsla strokes
//! - compose    - background + blurred glow + sharp pass
//! - scene      - canvas pair + simulation, resize handling
//! - headless   - recording surfaces (native runs, tests)
//! - canvas     - HtmlCanvasElement surfaces (browser)

pub mod canvas;
pub mod color;
pub mod compose;
pub mod headless;
pub mod scene;
pub mod surface;

pub use color::Hsla;
pub use compose::render;
pub use scene::PipeScene;
pub use surface::{Surface, SurfaceFactory};
