//! Browser surfaces backed by `<canvas>` elements

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::core::math::TAU;

use super::color::Hsla;
use super::surface::{Surface, SurfaceFactory};

// The visible canvas covers the viewport behind the page content
const DISPLAY_STYLE: [(&str, &str); 5] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
];

fn js_err(context: &str, err: JsValue) -> String {
    format!("{}: {:?}", context, err)
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(document: &Document, width: u32, height: u32) -> Result<Self, String> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| js_err("failed to create canvas", e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "created element is not a canvas".to_string())?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| js_err("2d context request failed", e))?
            .ok_or_else(|| "2d canvas context unavailable".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "context is not a CanvasRenderingContext2d".to_string())?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 { self.canvas.width() }

    fn height(&self) -> u32 { self.canvas.height() }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str) {
        self.ctx.set_fill_style_str(style);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.begin_path();
        // arc only throws on a negative radius
        if self.ctx.arc(x, y, radius, 0.0, TAU as f64).is_ok() {
            self.ctx.stroke();
        }
        self.ctx.close_path();
    }

    fn draw_surface(&mut self, source: &Self, blur_px: Option<f32>) -> Result<(), String> {
        if let Some(px) = blur_px {
            self.ctx.set_filter(&format!("blur({}px)", px));
        }
        let drawn = self
            .ctx
            .draw_image_with_html_canvas_element(&source.canvas, 0.0, 0.0)
            .map_err(|e| js_err("drawImage failed", e));
        if blur_px.is_some() {
            self.ctx.set_filter("none");
        }
        drawn
    }
}

/// Creates canvases in `document` and mounts the visible one into `container`
pub struct DomSurfaceFactory {
    document: Document,
    container: Element,
}

impl DomSurfaceFactory {
    pub fn new(document: Document, container: Element) -> Self {
        Self { document, container }
    }

    /// Look up the container with a CSS selector in the current window's document
    pub fn from_selector(selector: &str) -> Result<Self, String> {
        let document = web_sys::window()
            .ok_or_else(|| "no global window".to_string())?
            .document()
            .ok_or_else(|| "window has no document".to_string())?;
        let container = document
            .query_selector(selector)
            .map_err(|e| js_err("invalid container selector", e))?
            .ok_or_else(|| format!("container '{}' not found", selector))?;
        Ok(Self::new(document, container))
    }

    pub fn container(&self) -> &Element {
        &self.container
    }
}

impl SurfaceFactory for DomSurfaceFactory {
    type Surface = CanvasSurface;

    fn create(&mut self, width: u32, height: u32) -> Result<CanvasSurface, String> {
        CanvasSurface::new(&self.document, width, height)
    }

    fn attach(&mut self, display: &CanvasSurface) -> Result<(), String> {
        let style = display.canvas.style();
        for (prop, value) in DISPLAY_STYLE {
            style
                .set_property(prop, value)
                .map_err(|e| js_err("failed to style canvas", e))?;
        }
        self.container
            .append_child(&display.canvas)
            .map_err(|e| js_err("failed to attach canvas", e))?;
        Ok(())
    }

    fn detach(&mut self, display: &CanvasSurface) {
        display.canvas.remove();
    }
}
