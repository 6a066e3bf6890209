//! View state owned by a single visualizer instance.
//!
//! `ViewState` is the only mutable record behind a visualizer: named parameters,
//! the append-only list of committed samples, and an optional uncommitted
//! ("previewing") value. Figures are always derived from it, never stored in it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlidePlotError};

/// Value of a named parameter: a scalar slider setting or a boolean display toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Scalar(f64),
}

impl ParamValue {
    fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Flag(_) => "flag",
            ParamValue::Scalar(_) => "scalar",
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Flag(b) => write!(f, "{}", if *b { "on" } else { "off" }),
            ParamValue::Scalar(v) => write!(f, "{v:.2}"),
        }
    }
}

/// A committed input point together with the function value and slope at that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub slope: f64,
}

/// Preview sub-state of the slider input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingState {
    Idle,
    Previewing(f64),
}

/// Everything a visualizer knows about one session.
///
/// `samples` is append-only (a restore replaces it wholesale) and `pending_value` is cleared by every commit. The
/// figure is never stored here; it is rebuilt from this state on each redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    parameters: BTreeMap<String, ParamValue>,
    samples: Vec<Sample>,
    pending_value: Option<f64>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper used when constructing a demo's default state.
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Builder-style helper that seeds the sample history.
    pub fn with_seed(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn pending_value(&self) -> Option<f64> {
        self.pending_value
    }

    pub fn pending_state(&self) -> PendingState {
        match self.pending_value {
            Some(v) => PendingState::Previewing(v),
            None => PendingState::Idle,
        }
    }

    /// Current value of a scalar parameter, `None` if unset or a flag.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.parameters.get(name) {
            Some(ParamValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// Current value of a flag. Unknown flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.parameters.get(name), Some(ParamValue::Flag(true)))
    }

    /// Set a scalar parameter. Fails if `name` currently holds a flag.
    pub fn set_scalar(&mut self, name: &str, value: f64) -> Result<()> {
        match self.parameters.get_mut(name) {
            Some(ParamValue::Scalar(v)) => {
                *v = value;
                Ok(())
            }
            Some(other) => Err(SlidePlotError::ParamKind {
                name: name.to_string(),
                expected: "scalar",
                actual: other.kind_name(),
            }),
            None => {
                self.parameters
                    .insert(name.to_string(), ParamValue::Scalar(value));
                Ok(())
            }
        }
    }

    /// Flip a flag and return its new value. A missing flag starts from `false`.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let entry = self
            .parameters
            .entry(name.to_string())
            .or_insert(ParamValue::Flag(false));
        match entry {
            ParamValue::Flag(b) => {
                *b = !*b;
                Ok(*b)
            }
            other => Err(SlidePlotError::ParamKind {
                name: name.to_string(),
                expected: "flag",
                actual: other.kind_name(),
            }),
        }
    }

    /// Record a candidate value without touching the sample history.
    pub fn preview(&mut self, value: f64) {
        self.pending_value = Some(value);
    }

    /// Append a sample and leave the previewing state.
    pub fn commit(&mut self, sample: Sample) {
        self.samples.push(sample);
        self.pending_value = None;
    }
}
