//! Core helpers shared by every layer: slot access, math, randomness, logging.

#[macro_use]
pub mod utils {
    #[macro_use]
    pub mod safety;
}

#[macro_use]
pub mod log;
pub mod math;
pub mod random;
