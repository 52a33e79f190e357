//! Pipe record layout
//!
//! A pipe is 8 contiguous `f32` slots in the pool. `Pipe` is the by-value view
//! used when a whole record is read or written at once.

pub const PIPE_PROP_COUNT: usize = 8;

pub const PROP_X: usize = 0;
pub const PROP_Y: usize = 1;
pub const PROP_DIRECTION: usize = 2;
pub const PROP_SPEED: usize = 3;
pub const PROP_LIFE: usize = 4;
pub const PROP_TTL: usize = 5;
pub const PROP_WIDTH: usize = 6;
pub const PROP_HUE: usize = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
    pub direction: f32,     // radians
    pub speed: f32,         // pixels/frame
    pub life: f32,          // frames survived, whole numbers only
    pub ttl: f32,           // frames
    pub width: f32,         // arc radius
    pub hue: f32,           // degrees
}

impl Pipe {
    pub fn to_props(&self) -> [f32; PIPE_PROP_COUNT] {
        [
            self.x,
            self.y,
            self.direction,
            self.speed,
            self.life,
            self.ttl,
            self.width,
            self.hue,
        ]
    }

    pub fn from_props(props: &[f32]) -> Self {
        Self {
            x: props[PROP_X],
            y: props[PROP_Y],
            direction: props[PROP_DIRECTION],
            speed: props[PROP_SPEED],
            life: props[PROP_LIFE],
            ttl: props[PROP_TTL],
            width: props[PROP_WIDTH],
            hue: props[PROP_HUE],
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life > self.ttl
    }
}
