//! The immutable render payload and its wire form
//!
//! [`RenderSpec`] is what the builder produces. [`RenderSpec::to_payload`]
//! turns it into the JSON object the browser widget reads:
//!
//! ```text
//! { data: [x0, y0, z0, x1, ...], options: {...}, pch: "@", bg: "white" }
//! ```
//!
//! Option keys on the wire are not the Rust field names. The widget's
//! binding cannot use separators in option names, so each field maps to a
//! fixed wire name through [`OptionField`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::axis::{AxisRange, TickSet};
use crate::color::ColorSpec;
use crate::error::ScatterResult;
use crate::options::{PlotOptions, Renderer, SizeSpec};

/// Reserved point-character field, always sent as this value
pub const RESERVED_PCH: &str = "@";

/// Every option key the payload can carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionField {
    Width,
    Height,
    Axis,
    NumTicks,
    Color,
    Size,
    Labels,
    LabelMargin,
    Stroke,
    FlipVertical,
    Grid,
    Renderer,
    SignificantDigits,
    Background,
    Xlim,
    Ylim,
    Zlim,
    AxisLabels,
    XTick,
    YTick,
    ZTick,
    XTickLabels,
    YTickLabels,
    ZTickLabels,
}

impl OptionField {
    pub const ALL: [OptionField; 24] = [
        OptionField::Width,
        OptionField::Height,
        OptionField::Axis,
        OptionField::NumTicks,
        OptionField::Color,
        OptionField::Size,
        OptionField::Labels,
        OptionField::LabelMargin,
        OptionField::Stroke,
        OptionField::FlipVertical,
        OptionField::Grid,
        OptionField::Renderer,
        OptionField::SignificantDigits,
        OptionField::Background,
        OptionField::Xlim,
        OptionField::Ylim,
        OptionField::Zlim,
        OptionField::AxisLabels,
        OptionField::XTick,
        OptionField::YTick,
        OptionField::ZTick,
        OptionField::XTickLabels,
        OptionField::YTickLabels,
        OptionField::ZTickLabels,
    ];

    /// Internal field name
    pub fn field_name(&self) -> &'static str {
        self.names().0
    }

    /// Key used in the wire payload
    pub fn wire_name(&self) -> &'static str {
        self.names().1
    }

    fn names(&self) -> (&'static str, &'static str) {
        match self {
            OptionField::Width => ("width", "width"),
            OptionField::Height => ("height", "height"),
            OptionField::Axis => ("axis", "axis"),
            OptionField::NumTicks => ("num_ticks", "numticks"),
            OptionField::Color => ("color", "color"),
            OptionField::Size => ("size", "size"),
            OptionField::Labels => ("labels", "labels"),
            OptionField::LabelMargin => ("label_margin", "labelmargin"),
            OptionField::Stroke => ("stroke", "stroke"),
            OptionField::FlipVertical => ("flip_vertical", "flipy"),
            OptionField::Grid => ("grid", "grid"),
            OptionField::Renderer => ("renderer", "renderer"),
            OptionField::SignificantDigits => ("significant_digits", "signif"),
            OptionField::Background => ("background", "bg"),
            OptionField::Xlim => ("xlim", "xlim"),
            OptionField::Ylim => ("ylim", "ylim"),
            OptionField::Zlim => ("zlim", "zlim"),
            OptionField::AxisLabels => ("axis_labels", "axisLabels"),
            OptionField::XTick => ("xtick", "xtick"),
            OptionField::YTick => ("ytick", "ytick"),
            OptionField::ZTick => ("ztick", "ztick"),
            OptionField::XTickLabels => ("xticklab", "xticklab"),
            OptionField::YTickLabels => ("yticklab", "yticklab"),
            OptionField::ZTickLabels => ("zticklab", "zticklab"),
        }
    }

    /// Tick position field of a display slot
    pub fn tick_positions(slot: usize) -> Option<OptionField> {
        [OptionField::XTick, OptionField::YTick, OptionField::ZTick]
            .get(slot)
            .copied()
    }

    /// Tick label field of a display slot
    pub fn tick_labels(slot: usize) -> Option<OptionField> {
        [
            OptionField::XTickLabels,
            OptionField::YTickLabels,
            OptionField::ZTickLabels,
        ]
        .get(slot)
        .copied()
    }
}

/// Point appearance after sanitization
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualAttributes {
    pub color: ColorSpec,
    pub size: SizeSpec,
    pub labels: Option<Vec<String>>,
    pub stroke: String,
    pub background: String,
}

/// The JSON object handed to the widget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetPayload {
    pub data: Vec<f64>,
    pub options: Map<String, Value>,
    pub pch: String,
    pub bg: String,
}

impl WidgetPayload {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> ScatterResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Fully validated, normalized scatterplot ready for a widget host.
///
/// Per-axis data (`ranges`, `ticks`, `axis_labels`) is in display order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSpec {
    pub(crate) data: Vec<f64>,
    pub(crate) point_count: usize,
    pub(crate) ranges: [AxisRange; 3],
    pub(crate) ticks: [Option<TickSet>; 3],
    pub(crate) axis_labels: Option<[String; 3]>,
    pub(crate) visual: VisualAttributes,
    pub(crate) renderer: Renderer,
    pub(crate) options: PlotOptions,
}

impl RenderSpec {
    /// Flattened normalized coordinates
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Point `i` in display order
    pub fn point(&self, i: usize) -> Option<[f64; 3]> {
        let start = i.checked_mul(3)?;
        let row = self.data.get(start..start.checked_add(3)?)?;
        Some([row[0], row[1], row[2]])
    }

    /// Axis ranges used for scaling, in display order
    pub fn ranges(&self) -> &[AxisRange; 3] {
        &self.ranges
    }

    /// Tick sets in display order
    pub fn ticks(&self) -> &[Option<TickSet>; 3] {
        &self.ticks
    }

    /// Axis titles in display order
    pub fn axis_labels(&self) -> Option<&[String; 3]> {
        self.axis_labels.as_ref()
    }

    pub fn visual(&self) -> &VisualAttributes {
        &self.visual
    }

    /// Renderer after auto-selection
    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    pub fn width(&self) -> Option<u32> {
        self.options.width
    }

    pub fn height(&self) -> Option<u32> {
        self.options.height
    }

    /// Build the wire payload
    pub fn to_payload(&self) -> ScatterResult<WidgetPayload> {
        let mut options = Map::new();
        let mut put = |field: OptionField, value: Value| {
            options.insert(field.wire_name().to_string(), value);
        };

        let o = &self.options;
        if let Some(width) = o.width {
            put(OptionField::Width, width.into());
        }
        if let Some(height) = o.height {
            put(OptionField::Height, height.into());
        }
        put(OptionField::Axis, o.axis.into());
        put(OptionField::NumTicks, serde_json::to_value(&o.num_ticks)?);
        put(OptionField::Color, serde_json::to_value(&self.visual.color)?);
        put(OptionField::Size, serde_json::to_value(&self.visual.size)?);
        if let Some(labels) = &self.visual.labels {
            put(OptionField::Labels, serde_json::to_value(labels)?);
        }
        put(OptionField::LabelMargin, o.label_margin.clone().into());
        put(OptionField::Stroke, self.visual.stroke.clone().into());
        put(OptionField::FlipVertical, o.flip_vertical.into());
        put(OptionField::Grid, o.grid.into());
        put(OptionField::Renderer, self.renderer.as_str().into());
        put(
            OptionField::SignificantDigits,
            o.effective_significant_digits().into(),
        );
        put(OptionField::Background, self.visual.background.clone().into());
        for (field, limits) in [
            (OptionField::Xlim, o.xlim),
            (OptionField::Ylim, o.ylim),
            (OptionField::Zlim, o.zlim),
        ] {
            if let Some(limits) = limits {
                put(field, serde_json::to_value(limits)?);
            }
        }
        if let Some(axis_labels) = &self.axis_labels {
            put(OptionField::AxisLabels, serde_json::to_value(axis_labels)?);
        }

        for (slot, ticks) in self.ticks.iter().enumerate() {
            let Some(ticks) = ticks else { continue };
            if let Some(field) = OptionField::tick_positions(slot) {
                put(field, serde_json::to_value(ticks.positions())?);
            }
            if let Some(field) = OptionField::tick_labels(slot) {
                put(field, serde_json::to_value(ticks.labels())?);
            }
        }

        Ok(WidgetPayload {
            data: self.data.clone(),
            options,
            pch: RESERVED_PCH.to_string(),
            bg: self.visual.background.clone(),
        })
    }

    /// Serialize the wire payload to JSON
    pub fn to_json(&self) -> ScatterResult<String> {
        self.to_payload()?.to_json()
    }
}
