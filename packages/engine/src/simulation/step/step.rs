use crate::render::Surface;

use super::{PerfTimer, PipeSimulationCore};

pub(super) fn update_pipes<S: Surface>(sim: &mut PipeSimulationCore, surface: &mut S) {
    let perf_on = sim.perf_enabled;
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    let respawns_before = sim.respawns;

    if perf_on {
        sim.perf_stats.turns = 0;
    }

    sim.tick += 1;
    for slot in 0..sim.pool.count() {
        sim.update_pipe(slot, surface);
    }

    if let Some(t0) = step_start {
        sim.perf_stats.step_ms = t0.elapsed_ms();
        sim.perf_stats.pipes_updated = sim.pool.count() as u32;
        sim.perf_stats.respawns = (sim.respawns - respawns_before) as u32;
        sim.perf_stats.frame = sim.tick;
    }
}
