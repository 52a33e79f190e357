pub const TAU: f32 = std::f32::consts::TAU;
pub const HALF_PI: f32 = 0.5 * std::f32::consts::PI;

/// Triangular opacity envelope over a lifetime of `m` frames.
///
/// 0 at `t = 0` and `t = m`, 1 at `t = m / 2`, periodic in `m`.
/// The modulo keeps the sign of the dividend, so negative `t` mirrors.
#[inline]
pub fn fade_in_out(t: f32, m: f32) -> f32 {
    let hm = 0.5 * m;
    ((t + hm) % m - hm).abs() / hm
}

/// Round half up (`Math.round` semantics), so `-2.5 -> -2` and `2.5 -> 3`.
#[inline]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Largest `f32` strictly below `v` (finite `v`)
#[inline]
pub fn next_below(v: f32) -> f32 {
    if v > 0.0 {
        f32::from_bits(v.to_bits() - 1)
    } else if v < 0.0 {
        f32::from_bits(v.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    }
}
