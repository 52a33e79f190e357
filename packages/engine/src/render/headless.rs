//! Recording surfaces
//!
//! Nothing is rasterized. Each surface keeps the list of commands it
//! received, which is enough to check draw order, stroke colors and
//! compositing passes without a browser.

use super::color::Hsla;
use super::surface::{Surface, SurfaceFactory};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    FillRect { x: f64, y: f64, w: f64, h: f64, style: String },
    StrokeCircle { x: f64, y: f64, radius: f64, color: Hsla },
    DrawSurface { source_id: u32, blur_px: Option<f32> },
}

#[derive(Debug)]
pub struct HeadlessSurface {
    id: u32,
    width: u32,
    height: u32,
    depth: u32,
    commands: Vec<DrawCommand>,
}

impl HeadlessSurface {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height, depth: 0, commands: Vec::new() }
    }

    pub fn id(&self) -> u32 { self.id }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Current save/restore nesting
    pub fn depth(&self) -> u32 { self.depth }

    pub fn strokes(&self) -> impl Iterator<Item = (f64, f64, f64, Hsla)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeCircle { x, y, radius, color } => Some((*x, *y, *radius, *color)),
            _ => None,
        })
    }
}

impl Surface for HeadlessSurface {
    fn width(&self) -> u32 { self.width }

    fn height(&self) -> u32 { self.height }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, style: style.to_string() });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) {
        self.commands.push(DrawCommand::StrokeCircle { x, y, radius, color });
    }

    fn draw_surface(&mut self, source: &Self, blur_px: Option<f32>) -> Result<(), String> {
        if source.id == self.id {
            return Err(format!("surface {} cannot be drawn onto itself", self.id));
        }
        self.commands.push(DrawCommand::DrawSurface { source_id: source.id, blur_px });
        Ok(())
    }
}

/// Hands out numbered surfaces and tracks which display ids are attached.
#[derive(Debug, Default)]
pub struct HeadlessFactory {
    next_id: u32,
    attached: Vec<u32>,
    // Simulates the browser refusing to create another canvas
    refuse_create: bool,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> &[u32] {
        &self.attached
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn created_count(&self) -> u32 {
        self.next_id
    }

    pub fn refuse_create(&mut self, refuse: bool) {
        self.refuse_create = refuse;
    }
}

impl SurfaceFactory for HeadlessFactory {
    type Surface = HeadlessSurface;

    fn create(&mut self, width: u32, height: u32) -> Result<HeadlessSurface, String> {
        if self.refuse_create {
            return Err("surface creation refused".to_string());
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(HeadlessSurface::new(id, width, height))
    }

    fn attach(&mut self, display: &HeadlessSurface) -> Result<(), String> {
        if self.attached.contains(&display.id()) {
            return Err(format!("surface {} is already attached", display.id()));
        }
        self.attached.push(display.id());
        Ok(())
    }

    fn detach(&mut self, display: &HeadlessSurface) {
        self.attached.retain(|id| *id != display.id());
    }
}
