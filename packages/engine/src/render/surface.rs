use super::color::Hsla;

/// A 2D pixel surface the pipes are drawn onto.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn save(&mut self);
    fn restore(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str);

    /// Stroke a full circle outline
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla);

    /// Draw the pixel contents of `source` at the origin, gaussian-blurred by
    /// `blur_px` when given.
    fn draw_surface(&mut self, source: &Self, blur_px: Option<f32>) -> Result<(), String>;
}

/// Creates surfaces and hangs the visible one into the host page.
pub trait SurfaceFactory {
    type Surface: Surface;

    fn create(&mut self, width: u32, height: u32) -> Result<Self::Surface, String>;

    fn attach(&mut self, display: &Self::Surface) -> Result<(), String>;

    fn detach(&mut self, display: &Self::Surface);
}
