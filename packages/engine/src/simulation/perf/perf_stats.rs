use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(crate) step_ms: f64,
    pub(crate) render_ms: f64,
    pub(crate) pipes_updated: u32,
    pub(crate) turns: u32,
    pub(crate) respawns: u32,
    pub(crate) frame: u64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn pipes_updated(&self) -> u32 { self.pipes_updated }
    #[wasm_bindgen(getter)]
    pub fn turns(&self) -> u32 { self.turns }
    #[wasm_bindgen(getter)]
    pub fn respawns(&self) -> u32 { self.respawns }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }
}
