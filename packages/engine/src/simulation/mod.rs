//! PipeSimulationCore - the pipe pool and its per-frame update
//!
//! - init/   - pool allocation and per-slot spawning
//! - step/   - one tick over every pipe, movement, bounds, turning
//! - perf/   - optional per-step timings
//!
//! Drawing goes through `render::Surface`, so the same code runs against a
//! browser canvas or a recording surface.

use crate::domain::pipe::Pipe;
use crate::domain::settings::PipeSettings;
use crate::core::random::RandomSource;
use crate::render::Surface;
use crate::spatial::pool::PipePool;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/spawn.rs"]
mod spawn;
#[path = "step/step.rs"]
mod step;
#[path = "step/update.rs"]
mod update;

pub use perf_stats::PerfStats;

pub(crate) use perf_timer::PerfTimer;

pub struct PipeSimulationCore {
    settings: PipeSettings,
    pool: PipePool,

    width: u32,
    height: u32,
    center: (f32, f32),

    // State
    tick: u64,
    rng: Box<dyn RandomSource>,
    respawns: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl PipeSimulationCore {
    /// Allocate the pool for a `width` x `height` canvas and spawn every pipe
    pub fn new(settings: PipeSettings, width: u32, height: u32, rng: Box<dyn RandomSource>) -> Self {
        init::create_simulation_core(settings, width, height, rng)
    }

    /// Fresh pool sized for new bounds, tick back to 0
    pub fn reset(&mut self, width: u32, height: u32) {
        init::reset(self, width, height);
    }

    pub fn settings(&self) -> &PipeSettings { &self.settings }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn center(&self) -> (f32, f32) { self.center }

    pub fn tick(&self) -> u64 { self.tick }

    pub fn pipe_count(&self) -> usize { self.pool.count() }

    /// Total respawns since the last reset
    pub fn respawn_count(&self) -> u64 { self.respawns }

    pub fn pipe(&self, slot: usize) -> Option<Pipe> {
        (slot < self.pool.count()).then(|| self.pool.read(slot))
    }

    pub fn pipes(&self) -> impl Iterator<Item = Pipe> + '_ {
        self.pool.iter()
    }

    /// Raw view of the flat pool (for JS debugging overlays)
    pub fn pipes_ptr(&self) -> *const f32 {
        self.pool.as_ptr()
    }

    pub fn pipes_len(&self) -> usize {
        self.pool.len()
    }

    /// Heading change of a single turn, in radians
    pub fn turn_amount(&self) -> f32 {
        crate::core::math::TAU / self.settings.turn_count as f32
    }

    /// Respawn the pipe in `slot` with freshly drawn properties
    pub fn init_pipe(&mut self, slot: usize) {
        spawn::init_pipe(self, slot);
    }

    /// Advance one tick: draw, move, turn and age every pipe
    pub fn update_pipes<S: Surface>(&mut self, surface: &mut S) {
        step::update_pipes(self, surface);
    }

    /// Draw-then-advance a single pipe. Returns true if it respawned.
    pub fn update_pipe<S: Surface>(&mut self, slot: usize, surface: &mut S) -> bool {
        update::update_pipe(self, slot, surface)
    }

    /// Teleport wraparound into `[0, width] x [0, height]`
    pub fn check_bounds(&self, x: f32, y: f32) -> (f32, f32) {
        update::check_bounds(self.width as f32, self.height as f32, x, y)
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
        if !enabled {
            self.perf_stats.reset();
        }
    }

    pub fn perf_enabled(&self) -> bool { self.perf_enabled }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }

    pub(crate) fn record_render_ms(&mut self, ms: f64) {
        if self.perf_enabled {
            self.perf_stats.render_ms = ms;
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
