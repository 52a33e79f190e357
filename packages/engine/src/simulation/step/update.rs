use crate::core::math::{fade_in_out, round_half_up};
use crate::domain::pipe::Pipe;
use crate::render::{Hsla, Surface};

use super::PipeSimulationCore;

pub(super) fn update_pipe<S: Surface>(sim: &mut PipeSimulationCore, slot: usize, surface: &mut S) -> bool {
    let mut pipe = sim.pool.read(slot);

    // Stroke at the stored position first; the trail lags one step behind
    draw_pipe(sim, &pipe, surface);

    let x = pipe.x + pipe.direction.cos() * pipe.speed;
    let y = pipe.y + pipe.direction.sin() * pipe.speed;
    let (x, y) = check_bounds(sim.width as f32, sim.height as f32, x, y);
    pipe.x = x;
    pipe.y = y;

    // The period is redrawn on every check, so turns come in irregular bursts
    let period = round_half_up(sim.rng.rand(sim.settings.turn_chance_range));
    let on_period = period == 0.0 || sim.tick % (period as u64) == 0;
    let grid = sim.settings.turn_grid as f32;
    let turn_chance =
        on_period && (round_half_up(x) % grid == 0.0 || round_half_up(y) % grid == 0.0);
    let turn_bias = if round_half_up(sim.rng.rand(1.0)) != 0.0 { -1.0 } else { 1.0 };

    if turn_chance {
        pipe.direction += sim.turn_amount() * turn_bias;
        if sim.perf_enabled {
            sim.perf_stats.turns += 1;
        }
    }
    pipe.life += 1.0;

    sim.pool.write(slot, &pipe);

    if pipe.is_dead() {
        sim.init_pipe(slot);
        sim.respawns += 1;
        return true;
    }
    false
}

pub(super) fn check_bounds(width: f32, height: f32, mut x: f32, mut y: f32) -> (f32, f32) {
    if x > width {
        x = 0.0;
    }
    if x < 0.0 {
        x = width;
    }
    if y > height {
        y = 0.0;
    }
    if y < 0.0 {
        y = height;
    }
    (x, y)
}

fn draw_pipe<S: Surface>(sim: &PipeSimulationCore, pipe: &Pipe, surface: &mut S) {
    let s = &sim.settings;
    let alpha = fade_in_out(pipe.life, pipe.ttl) * s.fade_alpha;

    surface.save();
    surface.stroke_circle(
        pipe.x as f64,
        pipe.y as f64,
        pipe.width as f64,
        Hsla::new(pipe.hue, s.saturation, s.lightness, alpha),
    );
    surface.restore();
}
