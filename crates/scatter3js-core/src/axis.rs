//! Axis system for the 3D scatterplot
//!
//! Provides axis identities, the input-to-display axis permutation, range
//! computation, and tick mark generation with label formatting.
//!
//! The widget displays axes in a different order than they are supplied:
//! the second input axis (`y`) is moved to the third display slot so that
//! the third input axis (`z`) is drawn vertically. Every per-axis value that
//! travels to the widget goes through [`to_display_axis_order`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

/// Display slot of the axis affected by the vertical flip (input `y`)
pub const FLIPPED_DISPLAY_AXIS: usize = 2;

/// Semantic input axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    X,
    Y,
    Z,
}

impl AxisId {
    /// Input axes in input order
    pub const ALL: [AxisId; 3] = [AxisId::X, AxisId::Y, AxisId::Z];

    /// Lowercase axis name
    pub fn name(&self) -> &'static str {
        match self {
            AxisId::X => "x",
            AxisId::Y => "y",
            AxisId::Z => "z",
        }
    }

    /// Axes in display order
    pub fn display_order() -> [AxisId; 3] {
        to_display_axis_order(Self::ALL)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Permute per-axis values from input order `(x, y, z)` to display order `(x, z, y)`.
///
/// Coordinates, tick counts, limits, tick labels and axis labels all go
/// through this one function so they cannot disagree about the permutation.
pub fn to_display_axis_order<T>(values: [T; 3]) -> [T; 3] {
    let [x, y, z] = values;
    [x, z, y]
}

/// Column indices of the input table, listed in display order
pub fn display_columns() -> [usize; 3] {
    to_display_axis_order([0, 1, 2])
}

/// Range of one axis used to rescale coordinates and ticks into `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub axis: AxisId,
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Create a range, rejecting zero-span, inverted or non-finite bounds.
    ///
    /// The span itself must also be finite, or rescaling divides by infinity.
    pub fn new(axis: AxisId, min: f64, max: f64) -> ScatterResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(ScatterError::DegenerateRange { axis, min, max });
        }
        Ok(Self { axis, min, max })
    }

    /// Derive a range from data, or take the caller's override when present
    pub fn resolve(
        axis: AxisId,
        values: impl IntoIterator<Item = f64>,
        limits: Option<[f64; 2]>,
    ) -> ScatterResult<Self> {
        if let Some([min, max]) = limits {
            return Self::new(axis, min, max);
        }

        let (min, max) = values
            .into_iter()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .ok_or_else(|| {
                ScatterError::validation(format!(
                    "cannot derive a range for the {axis} axis without data; supply {axis}lim"
                ))
            })?;

        Self::new(axis, min, max)
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a data value into `[0, 1]`
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// `count` evenly spaced values from `min` to `max` inclusive
    pub fn linspace(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = self.span() / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        if i == count - 1 {
                            self.max
                        } else {
                            self.min + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}

/// A tick mark on an axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    /// Position in data coordinates
    pub value: f64,

    /// Position in normalized coordinates (0.0 to 1.0)
    pub position: f64,

    /// Label text
    pub label: String,
}

/// Ordered tick marks of one display axis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub ticks: Vec<TickMark>,
}

impl TickSet {
    /// Evenly spaced ticks across the range, labelled with [`format_tick_label`]
    pub fn generate(range: &AxisRange, count: usize) -> Self {
        let ticks = range
            .linspace(count.max(1))
            .into_iter()
            .map(|value| TickMark {
                value,
                position: range.normalize(value),
                label: format_tick_label(value),
            })
            .collect();
        Self { ticks }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Normalized tick positions
    pub fn positions(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.position).collect()
    }

    /// Tick labels in tick order
    pub fn labels(&self) -> Vec<String> {
        self.ticks.iter().map(|t| t.label.clone()).collect()
    }

    /// Reverse label order while keeping positions in place
    pub fn reverse_labels(&mut self) {
        let mut labels = self.labels();
        labels.reverse();
        for (tick, label) in self.ticks.iter_mut().zip(labels) {
            tick.label = label;
        }
    }

    /// Replace generated labels with caller-supplied ones
    pub fn replace_labels(&mut self, axis: AxisId, labels: &[String]) -> ScatterResult<()> {
        crate::error::validation::validate_tick_labels(axis, labels.len(), self.len())?;
        for (tick, label) in self.ticks.iter_mut().zip(labels) {
            tick.label = label.clone();
        }
        Ok(())
    }
}

/// Format a tick value with two fractional digits.
///
/// Small non-zero values switch to scientific notation so they do not
/// collapse to `0.00`.
pub fn format_tick_label(value: f64) -> String {
    if value == 0.0 {
        "0.00".to_string()
    } else if value.abs() < 0.01 {
        format_scientific(value)
    } else {
        format!("{:.2}", value)
    }
}

/// C-style `%.2e` formatting (`5.00e-03`)
fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => formatted,
    }
}
