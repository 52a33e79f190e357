use crate::domain::settings::PipeSettings;

use super::surface::Surface;

/// Recomposite the display surface from the accumulated drawing surface:
/// background fill, blurred glow pass, then the sharp strokes on top.
pub fn render<S: Surface>(display: &mut S, drawing: &S, settings: &PipeSettings) -> Result<(), String> {
    let w = display.width() as f64;
    let h = display.height() as f64;

    display.save();
    display.fill_rect(0.0, 0.0, w, h, &settings.background);
    display.restore();

    let blur = (settings.blur_px > 0.0).then_some(settings.blur_px);
    display.save();
    let glow = display.draw_surface(drawing, blur);
    display.restore();
    glow?;

    display.save();
    let sharp = display.draw_surface(drawing, None);
    display.restore();
    sharp
}
