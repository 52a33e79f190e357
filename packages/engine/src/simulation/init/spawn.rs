use crate::core::math::{round_half_up, HALF_PI, TAU};
use crate::domain::pipe::Pipe;

use super::PipeSimulationCore;

/// Spawn on the horizontal center line, heading straight up or down.
///
/// Draw order matters for seeded runs: x, direction, speed, ttl, width, hue.
pub(super) fn init_pipe(sim: &mut PipeSimulationCore, slot: usize) {
    let s = &sim.settings;
    let rng = &mut sim.rng;

    let x = rng.rand_range(0.0, sim.width as f32);
    let y = sim.center.1;
    let direction = if round_half_up(rng.rand(1.0)) != 0.0 { HALF_PI } else { TAU - HALF_PI };
    let speed = rng.rand_range(s.base_speed, s.range_speed);
    let ttl = rng.rand_range(s.base_ttl, s.range_ttl);
    let width = rng.rand_range(s.base_width, s.range_width);
    let hue = rng.rand_range(s.base_hue, s.range_hue);

    sim.pool.write(
        slot,
        &Pipe { x, y, direction, speed, life: 0.0, ttl, width, hue },
    );
}
