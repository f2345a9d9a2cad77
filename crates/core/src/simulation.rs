//! Per-frame pipeline over a whole rotor-bearing assembly.
//!
//! A step evaluates every bearing, then aggregates the legend range from all
//! of their stats, then appends history, then maps values for display. Each
//! stage needs the complete output of the previous one, so nothing is
//! interleaved.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

use crate::aggregate::{HistoryLog, LegendRange};
use crate::display::DisplayBuffers;
use crate::engine::Engine;
use crate::error::FieldError;
use crate::evaluator::{evaluate_into, BearingField, DESIGN_RPM};
use crate::field::{BearingStats, FieldType, FieldValues};
use crate::geometry::BearingGeometry;
use crate::load::BearingLoadConfig;
use crate::params::{param_bool, param_f64, param_field_type};

/// Upper bound advertised for the rpm control.
const MAX_RPM: f64 = 10_000.0;

/// One bearing of the assembly.
#[derive(Debug, Clone)]
pub struct Bearing {
    pub name: String,
    pub geometry: BearingGeometry,
    pub load: BearingLoadConfig,
}

impl Bearing {
    pub fn new(
        name: impl Into<String>,
        geometry: BearingGeometry,
        load: BearingLoadConfig,
    ) -> Self {
        let bearing = Self {
            name: name.into(),
            geometry,
            load,
        };
        bearing.warn_if_degraded();
        bearing
    }

    fn warn_if_degraded(&self) {
        if self.load.is_degraded() {
            warn!(
                bearing = %self.name,
                pad_count = self.load.pad_count,
                pad_angle = self.load.pad_angle,
                "pad layout does not fit the circumference, using full-circle profile"
            );
        }
    }
}

/// Global controls of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParams {
    pub rpm: f64,
    pub field_type: FieldType,
    pub running: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            rpm: 1500.0,
            field_type: FieldType::Pressure,
            running: true,
        }
    }
}

/// Output of one bearing for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BearingFrame {
    pub stats: BearingStats,
    #[serde(skip)]
    pub values: FieldValues,
    #[serde(skip)]
    pub display: DisplayBuffers,
}

/// Output of the whole assembly for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub elapsed: f64,
    pub rpm: f64,
    pub field_type: FieldType,
    pub legend: LegendRange,
    pub bearings: Vec<BearingFrame>,
}

impl Frame {
    /// Stats of every bearing, in assembly order.
    pub fn stats(&self) -> Vec<BearingStats> {
        self.bearings.iter().map(|b| b.stats).collect()
    }
}

/// A rotor-bearing assembly together with its clock, controls and history.
pub struct RotorSimulation {
    bearings: Vec<Bearing>,
    params: SimulationParams,
    elapsed: f64,
    history: HistoryLog,
    frame: Frame,
}

impl RotorSimulation {
    /// Builds the assembly and computes the frame at `t = 0`. History starts
    /// empty; it is only appended by running steps.
    pub fn new(bearings: Vec<Bearing>, params: SimulationParams) -> Self {
        let mut sim = Self {
            bearings,
            params,
            elapsed: 0.0,
            history: HistoryLog::default(),
            frame: Frame {
                elapsed: 0.0,
                rpm: params.rpm,
                field_type: params.field_type,
                legend: LegendRange { min: 0.0, max: 1.0 },
                bearings: Vec::new(),
            },
        };
        sim.history.reset(sim.bearings.len());
        sim.recompute(false);
        sim
    }

    pub fn bearings(&self) -> &[Bearing] {
        &self.bearings
    }

    pub fn sim_params(&self) -> SimulationParams {
        self.params
    }

    /// Simulated seconds elapsed while running.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn set_rpm(&mut self, rpm: f64) {
        self.params.rpm = rpm;
        self.recompute(false);
    }

    /// Changes which field is mapped for display. Evaluation is unaffected.
    pub fn set_field_type(&mut self, field_type: FieldType) {
        self.params.field_type = field_type;
        self.recompute(false);
    }

    /// Pausing stops the clock and history; frames are still recomputed.
    pub fn set_running(&mut self, running: bool) {
        self.params.running = running;
    }

    /// Adds a bearing. History is reset because the bearing count changed.
    pub fn add_bearing(&mut self, bearing: Bearing) {
        self.bearings.push(bearing);
        self.on_bearing_count_changed();
    }

    /// Removes and returns bearing `index`. History is reset.
    pub fn remove_bearing(&mut self, index: usize) -> Result<Bearing, FieldError> {
        self.check_index(index)?;
        let removed = self.bearings.remove(index);
        self.on_bearing_count_changed();
        Ok(removed)
    }

    /// Replaces the load configuration of bearing `index`.
    pub fn set_load(&mut self, index: usize, load: BearingLoadConfig) -> Result<(), FieldError> {
        self.check_index(index)?;
        let bearing = &mut self.bearings[index];
        bearing.load = load;
        bearing.warn_if_degraded();
        self.recompute(false);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), FieldError> {
        if index < self.bearings.len() {
            Ok(())
        } else {
            Err(FieldError::BearingOutOfRange {
                index,
                count: self.bearings.len(),
            })
        }
    }

    fn on_bearing_count_changed(&mut self) {
        debug!(count = self.bearings.len(), "assembly rebuilt");
        self.history.reset(self.bearings.len());
        self.recompute(false);
    }

    /// Runs the pipeline for the current clock and controls.
    fn recompute(&mut self, record_history: bool) {
        let SimulationParams {
            rpm, field_type, ..
        } = self.params;
        let elapsed = self.elapsed;

        let mut recycled: Vec<FieldValues> = std::mem::take(&mut self.frame.bearings)
            .into_iter()
            .map(|b| b.values)
            .collect();
        recycled.resize_with(self.bearings.len(), FieldValues::default);

        let fields: Vec<BearingField> = self
            .bearings
            .iter()
            .zip(recycled)
            .map(|(b, buffers)| evaluate_into(&b.geometry, &b.load, rpm, elapsed, buffers))
            .collect();

        let stats: Vec<BearingStats> = fields.iter().map(|f| f.stats).collect();
        let legend = LegendRange::aggregate(&stats, field_type, rpm);

        if record_history {
            self.history.record(elapsed, &stats);
        }

        let bearings = self
            .bearings
            .iter()
            .zip(fields)
            .map(|(b, field)| BearingFrame {
                display: DisplayBuffers::map_bearing(
                    &b.geometry,
                    &field.values,
                    legend,
                    field_type,
                ),
                stats: field.stats,
                values: field.values,
            })
            .collect();

        trace!(elapsed, rpm, %field_type, min = legend.min, max = legend.max, "frame");
        self.frame = Frame {
            elapsed,
            rpm,
            field_type,
            legend,
            bearings,
        };
    }
}

impl Engine for RotorSimulation {
    fn step(&mut self, dt: f64) {
        let running = self.params.running;
        if running && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.recompute(running);
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn history(&self) -> &HistoryLog {
        &self.history
    }

    fn params(&self) -> Value {
        json!({
            "rpm": self.params.rpm,
            "field_type": self.params.field_type.name(),
            "running": self.params.running,
        })
    }

    fn set_params(&mut self, params: &Value) {
        self.params = SimulationParams {
            rpm: param_f64(params, "rpm", self.params.rpm),
            field_type: param_field_type(params, "field_type", self.params.field_type),
            running: param_bool(params, "running", self.params.running),
        };
        debug!(
            rpm = self.params.rpm,
            field_type = %self.params.field_type,
            running = self.params.running,
            "params updated"
        );
        self.recompute(false);
    }

    fn param_schema(&self) -> Value {
        let defaults = SimulationParams::default();
        json!({
            "rpm": {
                "type": "number",
                "default": defaults.rpm,
                "min": 0.0,
                "max": MAX_RPM,
                "description": format!("Rotor speed; visual effects saturate at {DESIGN_RPM} rpm"),
            },
            "field_type": {
                "type": "string",
                "default": defaults.field_type.name(),
                "enum": FieldType::ALL.iter().map(|t| t.name()).collect::<Vec<_>>(),
                "description": "Field mapped to color and displacement",
            },
            "running": {
                "type": "boolean",
                "default": defaults.running,
                "description": "Whether the clock advances and history is recorded",
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn journal(name: &str) -> Bearing {
        Bearing::new(
            name,
            BearingGeometry::cylinder(0.5, 0.4, 48, 6).unwrap(),
            BearingLoadConfig::full_circle(0.0),
        )
    }

    fn tilting(name: &str) -> Bearing {
        Bearing::new(
            name,
            BearingGeometry::cylinder(0.6, 0.3, 60, 4).unwrap(),
            BearingLoadConfig::tilting_pad(-PI / 4.0, 4, 70.0),
        )
    }

    fn sim() -> RotorSimulation {
        RotorSimulation::new(vec![journal("de"), tilting("nde")], SimulationParams::default())
    }

    // -- Construction --

    #[test]
    fn new_computes_initial_frame_without_history() {
        let s = sim();
        assert_eq!(s.frame().bearings.len(), 2);
        assert_eq!(s.frame().elapsed, 0.0);
        assert_eq!(s.history().len(), 2);
        assert!(s.history().iter().all(|h| h.pressure.is_empty()));
    }

    #[test]
    fn frame_buffers_match_geometry() {
        let s = sim();
        for (b, f) in s.bearings().iter().zip(&s.frame().bearings) {
            assert_eq!(f.values.len(), b.geometry.len());
            assert_eq!(f.display.len(), b.geometry.len());
        }
    }

    // -- Stepping --

    #[test]
    fn running_step_advances_clock_and_records_history() {
        let mut s = sim();
        s.step(0.1);
        s.step(0.1);
        assert!((s.elapsed() - 0.2).abs() < 1e-12);
        let h = s.history().bearing(0).unwrap();
        assert_eq!(h.pressure.len(), 2);
        assert!((h.pressure.latest().unwrap().time - 0.2).abs() < 1e-12);
        assert_eq!(
            h.pressure.latest().unwrap().value,
            s.frame().bearings[0].stats.max_pressure
        );
    }

    #[test]
    fn paused_step_keeps_clock_and_history() {
        let mut s = sim();
        s.step(0.1);
        s.set_running(false);
        s.step(0.1);
        s.step(0.1);
        assert!((s.elapsed() - 0.1).abs() < 1e-12);
        assert_eq!(s.history().bearing(1).unwrap().temperature.len(), 1);
    }

    #[test]
    fn legend_covers_every_bearing() {
        let mut s = sim();
        s.set_rpm(3800.0);
        s.step(0.05);
        let frame = s.frame();
        let expected = LegendRange::aggregate(&frame.stats(), FieldType::Pressure, 3800.0);
        assert_eq!(frame.legend, expected);
        assert!(frame.legend.max > frame.legend.min);
    }

    #[test]
    fn field_selection_changes_display_not_values() {
        let mut s = sim();
        s.step(0.3);
        let before = s.frame().bearings[0].values.clone();
        s.set_field_type(FieldType::Temperature);
        assert_eq!(s.frame().bearings[0].values, before);
        assert_eq!(s.frame().field_type, FieldType::Temperature);
        assert!(s.frame().legend.min >= 40.0);
    }

    #[test]
    fn repeated_steps_are_deterministic() {
        let mut a = sim();
        let mut b = sim();
        for _ in 0..10 {
            a.step(1.0 / 60.0);
            b.step(1.0 / 60.0);
        }
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn non_positive_dt_does_not_rewind() {
        let mut s = sim();
        s.step(0.5);
        s.step(-1.0);
        s.step(f64::NAN);
        assert!((s.elapsed() - 0.5).abs() < 1e-12);
    }

    // -- Assembly changes --

    #[test]
    fn adding_a_bearing_resets_history() {
        let mut s = sim();
        s.step(0.1);
        s.add_bearing(journal("extra"));
        assert_eq!(s.history().len(), 3);
        assert!(s.history().iter().all(|h| h.pressure.is_empty()));
        assert_eq!(s.frame().bearings.len(), 3);
    }

    #[test]
    fn remove_bearing_checks_index() {
        let mut s = sim();
        assert!(matches!(
            s.remove_bearing(5),
            Err(FieldError::BearingOutOfRange { index: 5, count: 2 })
        ));
        let removed = s.remove_bearing(0).unwrap();
        assert_eq!(removed.name, "de");
        assert_eq!(s.frame().bearings.len(), 1);
    }

    #[test]
    fn set_load_recomputes_frame() {
        let mut s = sim();
        s.set_rpm(2000.0);
        let before = s.frame().bearings[0].stats;
        s.set_load(0, BearingLoadConfig::tilting_pad(0.0, 2, 90.0)).unwrap();
        assert_ne!(s.frame().bearings[0].stats, before);
        assert!(s.set_load(9, BearingLoadConfig::default()).is_err());
    }

    #[test]
    fn empty_assembly_still_produces_a_valid_legend() {
        let mut s = RotorSimulation::new(Vec::new(), SimulationParams::default());
        s.step(0.1);
        assert!(s.frame().bearings.is_empty());
        assert!(s.frame().legend.max > s.frame().legend.min);
    }

    // -- Params --

    #[test]
    fn set_params_applies_only_present_keys() {
        let mut s = sim();
        s.set_params(&json!({"rpm": 4000, "field_type": "thickness"}));
        let p = s.params();
        assert_eq!(p["rpm"], 4000.0);
        assert_eq!(p["field_type"], "thickness");
        assert_eq!(p["running"], true);
        assert_eq!(s.frame().legend.max, 90.0);
    }

    #[test]
    fn param_schema_describes_all_controls() {
        let schema = sim().param_schema();
        for key in ["rpm", "field_type", "running"] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
            assert!(schema[key].get("type").is_some(), "{key} missing type");
            assert!(schema[key].get("default").is_some(), "{key} missing default");
        }
        assert_eq!(schema["field_type"]["enum"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn frame_serializes_stats_and_legend() {
        let s = sim();
        let v = serde_json::to_value(s.frame()).unwrap();
        assert!(v["legend"]["max"].is_number());
        assert!(v["bearings"][1]["stats"]["min_thickness"].is_number());
        assert!(v["bearings"][0].get("values").is_none());
        assert_eq!(v["field_type"], "pressure");
    }
}
