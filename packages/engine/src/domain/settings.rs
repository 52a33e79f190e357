//! Animation tunables
//!
//! Defaults reproduce the stock look: 30 cyan-to-blue pipes fanning out from
//! the horizontal center line. Any subset can be overridden from JSON.

use serde::{Deserialize, Serialize};

/// Upper bound on the pool size
pub const MAX_PIPE_COUNT: usize = 100_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipeSettings {
    pub pipe_count: usize,

    pub base_speed: f32,
    pub range_speed: f32,
    pub base_ttl: f32,
    pub range_ttl: f32,
    pub base_width: f32,
    pub range_width: f32,
    pub base_hue: f32,
    pub range_hue: f32,

    /// Full circle is split into this many turn steps (8 -> 45 degrees)
    pub turn_count: u32,
    /// Upper bound of the randomized turn period
    pub turn_chance_range: f32,
    /// Turns only happen on this pixel grid
    pub turn_grid: u32,

    pub saturation: f32,
    pub lightness: f32,
    /// Peak stroke opacity
    pub fade_alpha: f32,

    pub background: String,
    pub blur_px: f32,
}

impl Default for PipeSettings {
    fn default() -> Self {
        Self {
            pipe_count: 30,
            base_speed: 0.5,
            range_speed: 1.0,
            base_ttl: 100.0,
            range_ttl: 300.0,
            base_width: 2.0,
            range_width: 4.0,
            base_hue: 180.0,
            range_hue: 60.0,
            turn_count: 8,
            turn_chance_range: 100.0,
            turn_grid: 6,
            saturation: 75.0,
            lightness: 50.0,
            fade_alpha: 0.125,
            background: "hsla(150,80%,1%,1)".to_string(),
            blur_px: 12.0,
        }
    }
}

impl PipeSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: PipeSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pipe_count == 0 {
            return Err("pipe_count must be at least 1".to_string());
        }
        if self.pipe_count > MAX_PIPE_COUNT {
            return Err(format!("pipe_count must be at most {}, got {}", MAX_PIPE_COUNT, self.pipe_count));
        }
        let ranges = [
            ("base_speed", self.base_speed),
            ("range_speed", self.range_speed),
            ("range_ttl", self.range_ttl),
            ("base_width", self.base_width),
            ("range_width", self.range_width),
            ("range_hue", self.range_hue),
            ("turn_chance_range", self.turn_chance_range),
            ("blur_px", self.blur_px),
        ];
        for (name, value) in ranges {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite non-negative number, got {}", name, value));
            }
        }
        if !(self.base_ttl.is_finite() && self.base_ttl > 0.0) {
            return Err(format!("base_ttl must be positive, got {}", self.base_ttl));
        }
        if self.turn_count == 0 {
            return Err("turn_count must be at least 1".to_string());
        }
        if self.turn_grid == 0 {
            return Err("turn_grid must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err(format!("fade_alpha must be within [0, 1], got {}", self.fade_alpha));
        }
        Ok(())
    }
}
