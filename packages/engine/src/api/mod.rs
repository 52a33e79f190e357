//! Public API
//!
//! - scheduler   - where the next frame comes from
//! - frame_loop  - start/stop lifecycle around a per-frame body
//! - wasm        - JS-facing `PipeAnimation`

pub mod frame_loop;
pub mod scheduler;
pub mod wasm;
