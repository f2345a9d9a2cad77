//! The `Engine` trait that drives a bearing assembly frame by frame.
//!
//! The trait is object-safe so a host (CLI, render loop, bindings) can hold a
//! `Box<dyn Engine>` without knowing how the assembly was built.

use serde_json::Value;

use crate::aggregate::HistoryLog;
use crate::simulation::Frame;

/// Frame-stepped field engine.
///
/// Each [`step`](Engine::step) runs the whole pipeline synchronously:
/// evaluation of every bearing, legend aggregation, history, display mapping.
pub trait Engine {
    /// Advances the clock by `dt` seconds (when running) and recomputes the frame.
    fn step(&mut self, dt: f64);

    /// The most recently computed frame.
    fn frame(&self) -> &Frame;

    /// Per-bearing extrema history for charting.
    fn history(&self) -> &HistoryLog;

    /// Current control values as a JSON object.
    fn params(&self) -> Value;

    /// Applies the controls present in `params`; absent keys are left unchanged.
    fn set_params(&mut self, params: &Value);

    /// Schema describing the controls, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
