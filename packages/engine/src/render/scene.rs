//! PipeScene - one simulation plus the canvas pair it draws into
//!
//! The drawing surface accumulates strokes and is never cleared. The display
//! surface is the only one attached to the page and is recomposited from the
//! drawing surface every frame.

use crate::core::random::RandomSource;
use crate::domain::settings::PipeSettings;
use crate::simulation::{PerfTimer, PipeSimulationCore};

use super::compose::render;
use super::surface::{Surface, SurfaceFactory};

pub struct PipeScene<F: SurfaceFactory> {
    factory: F,
    drawing: F::Surface,
    display: F::Surface,
    sim: PipeSimulationCore,
    mounted: bool,
}

impl<F: SurfaceFactory> PipeScene<F> {
    /// Create both surfaces, attach the display one and spawn the pool
    pub fn new(
        mut factory: F,
        settings: PipeSettings,
        width: u32,
        height: u32,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, String> {
        settings.validate()?;

        let drawing = factory.create(width, height)?;
        let display = factory.create(width, height)?;
        factory.attach(&display)?;

        let sim = PipeSimulationCore::new(settings, width, height, rng);
        log!("🌀 flow pipes: {} pipes on {}x{}", sim.pipe_count(), width, height);

        Ok(Self { factory, drawing, display, sim, mounted: true })
    }

    /// One frame: update every pipe into the drawing surface, then composite
    pub fn frame(&mut self) -> Result<(), String> {
        self.sim.update_pipes(&mut self.drawing);

        let t0 = self.sim.perf_enabled().then(PerfTimer::start);
        render(&mut self.display, &self.drawing, self.sim.settings())?;
        if let Some(t0) = t0 {
            self.sim.record_render_ms(t0.elapsed_ms());
        }
        Ok(())
    }

    /// Swap in surfaces sized `width` x `height` and restart the simulation.
    ///
    /// The old picture is copied over unscaled (cropped or padded), the pool
    /// and tick are not carried over.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        let mut drawing = self.factory.create(width, height)?;
        let mut display = self.factory.create(width, height)?;

        if let Err(e) = drawing.draw_surface(&self.display, None) {
            warn!("flow pipes: trail carry-over skipped: {}", e);
        } else if let Err(e) = display.draw_surface(&drawing, None) {
            warn!("flow pipes: trail carry-over skipped: {}", e);
        }

        if self.mounted {
            self.factory.attach(&display)?;
            self.factory.detach(&self.display);
        }
        self.drawing = drawing;
        self.display = display;

        self.sim.reset(width, height);
        log!("🌀 flow pipes: resized to {}x{}", width, height);
        Ok(())
    }

    /// Take the display surface off the page. Frames still run but nothing is visible.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.factory.detach(&self.display);
            self.mounted = false;
        }
    }

    pub fn is_mounted(&self) -> bool { self.mounted }

    pub fn sim(&self) -> &PipeSimulationCore { &self.sim }

    pub fn sim_mut(&mut self) -> &mut PipeSimulationCore { &mut self.sim }

    pub fn factory(&self) -> &F { &self.factory }

    pub fn factory_mut(&mut self) -> &mut F { &mut self.factory }

    pub fn drawing(&self) -> &F::Surface { &self.drawing }

    pub fn display(&self) -> &F::Surface { &self.display }

    pub fn width(&self) -> u32 { self.display.width() }

    pub fn height(&self) -> u32 { self.display.height() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::Xorshift32;
    use crate::render::headless::{DrawCommand, HeadlessFactory};

    fn scene(width: u32, height: u32) -> PipeScene<HeadlessFactory> {
        PipeScene::new(
            HeadlessFactory::new(),
            PipeSettings::default(),
            width,
            height,
            Box::new(Xorshift32::new(0xC0FFEE)),
        )
        .unwrap()
    }

    #[test]
    fn setup_attaches_only_the_display_surface() {
        let scene = scene(800, 600);
        assert_eq!(scene.factory().attached(), &[scene.display().id()]);
        assert_eq!(scene.factory().created_count(), 2);
        assert_eq!(scene.sim().pipe_count(), 30);
    }

    #[test]
    fn frame_updates_then_composites() {
        let mut scene = scene(800, 600);
        scene.frame().unwrap();
        scene.frame().unwrap();

        assert_eq!(scene.sim().tick(), 2);
        // Strokes accumulate on the drawing surface across frames
        assert_eq!(scene.drawing().strokes().count(), 60);
        let blurred = scene
            .display()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawSurface { blur_px: Some(_), .. }))
            .count();
        assert_eq!(blurred, 2);
    }

    #[test]
    fn resize_replaces_surfaces_and_pool() {
        let mut scene = scene(800, 600);
        for _ in 0..10 {
            scene.frame().unwrap();
        }
        let old_display = scene.display().id();

        scene.resize(1024, 768).unwrap();

        assert_eq!(scene.width(), 1024);
        assert_eq!(scene.height(), 768);
        assert_eq!(scene.factory().attached_count(), 1);
        assert_ne!(scene.factory().attached()[0], old_display);
        assert_eq!(scene.sim().tick(), 0);
        assert_eq!(scene.sim().pipe_count(), 30);
        for p in scene.sim().pipes() {
            assert!((0.0..=1024.0).contains(&p.x));
            assert!((0.0..=768.0).contains(&p.y));
        }

        // Old picture carried into the new drawing surface
        assert_eq!(
            scene.drawing().commands(),
            &[DrawCommand::DrawSurface { source_id: old_display, blur_px: None }]
        );
    }

    #[test]
    fn unmount_detaches_and_resize_stays_detached() {
        let mut scene = scene(320, 240);
        scene.unmount();
        assert_eq!(scene.factory().attached_count(), 0);
        scene.resize(640, 480).unwrap();
        assert_eq!(scene.factory().attached_count(), 0);
        assert!(!scene.is_mounted());
    }

    #[test]
    fn invalid_settings_fail_setup() {
        let settings = PipeSettings { pipe_count: 0, ..PipeSettings::default() };
        let result = PipeScene::new(HeadlessFactory::new(), settings, 10, 10, Box::new(Xorshift32::default()));
        assert!(result.is_err());
    }
}
