//! Plot configuration
//!
//! [`PlotOptions`] is the explicit configuration record for one scatterplot.
//! It can be built in code with the `with_*` setters or parsed from a JSON
//! or TOML option document whose keys use the widget's camelCase names
//! (`numTicks`, `flipVertical`, `significantDigits`, ...). Absent keys take
//! the defaults below.

use serde::{Deserialize, Serialize};

use crate::axis::{to_display_axis_order, AxisId};
use crate::color::ColorSpec;
use crate::error::{ScatterError, ScatterResult};

/// Default tick count per axis
pub const DEFAULT_NUM_TICKS: usize = 6;

/// Largest tick count accepted per axis
pub const MAX_NUM_TICKS: usize = 1_000;

/// Default significant digits kept in coordinates
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 8;

/// Upper bound for significant digits (f64 precision)
pub const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Point count above which an unspecified renderer becomes webgl
pub const WEBGL_POINT_THRESHOLD: usize = 10_000;

/// Rendering strategy passed through to the widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// Let the widget decide
    Auto,
    /// 2D canvas; supports per-point sizes
    Canvas,
    /// WebGL; uniform point size only
    WebGl,
}

impl Renderer {
    /// Wire name of the renderer
    pub fn as_str(&self) -> &'static str {
        match self {
            Renderer::Auto => "auto",
            Renderer::Canvas => "canvas",
            Renderer::WebGl => "webgl",
        }
    }

    /// Resolve the renderer for a point count.
    ///
    /// An explicit request is returned unchanged. Without one, large clouds
    /// get webgl and everything else gets canvas.
    pub fn resolve(requested: Option<Renderer>, point_count: usize) -> Renderer {
        match requested {
            Some(renderer) => renderer,
            None if point_count > WEBGL_POINT_THRESHOLD => {
                tracing::debug!(
                    point_count,
                    threshold = WEBGL_POINT_THRESHOLD,
                    "no renderer requested, switching to webgl"
                );
                Renderer::WebGl
            }
            None => Renderer::Canvas,
        }
    }
}

/// A uniform point size or one size per point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Uniform(f64),
    PerPoint(Vec<f64>),
}

impl SizeSpec {
    /// Number of per-point entries, `None` for a uniform size
    pub fn per_point_len(&self) -> Option<usize> {
        match self {
            SizeSpec::Uniform(_) => None,
            SizeSpec::PerPoint(sizes) => Some(sizes.len()),
        }
    }

    /// Reject negative or non-finite sizes
    pub fn validate(&self) -> ScatterResult<()> {
        let values: &[f64] = match self {
            SizeSpec::Uniform(size) => std::slice::from_ref(size),
            SizeSpec::PerPoint(sizes) => sizes,
        };
        match values.iter().find(|s| !s.is_finite() || **s < 0.0) {
            Some(bad) => Err(ScatterError::validation(format!(
                "point size must be a finite non-negative number, got {bad}"
            ))),
            None => Ok(()),
        }
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        SizeSpec::Uniform(1.0)
    }
}

/// Caller-supplied tick labels, keyed by input axis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickLabels {
    pub x: Option<Vec<String>>,
    pub y: Option<Vec<String>>,
    pub z: Option<Vec<String>>,
}

impl TickLabels {
    /// Labels for one input axis
    pub fn get(&self, axis: AxisId) -> Option<&[String]> {
        match axis {
            AxisId::X => self.x.as_deref(),
            AxisId::Y => self.y.as_deref(),
            AxisId::Z => self.z.as_deref(),
        }
    }

    /// Labels permuted into display order
    pub fn in_display_order(&self) -> [Option<&[String]>; 3] {
        to_display_axis_order(AxisId::ALL.map(|axis| self.get(axis)))
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }
}

/// Configuration for one scatterplot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotOptions {
    /// Container width in pixels (host default when absent)
    pub width: Option<u32>,

    /// Container height in pixels (host default when absent)
    pub height: Option<u32>,

    /// Draw the axis box
    pub axis: bool,

    /// Tick count per input axis. `None` disables ticks; a `None` entry
    /// disables ticks on that axis.
    pub num_ticks: Option<Vec<Option<usize>>>,

    /// Tick label overrides per input axis
    pub tick_labels: TickLabels,

    /// Point colors
    pub color: ColorSpec,

    /// Point sizes
    pub size: SizeSpec,

    /// Per-point hover labels
    pub labels: Option<Vec<String>>,

    /// CSS margin around labels
    pub label_margin: String,

    /// Point outline color
    pub stroke: String,

    /// Invert the flipped display axis
    pub flip_vertical: bool,

    /// Draw grid lines
    pub grid: bool,

    /// Requested renderer; absent lets the point count decide
    pub renderer: Option<Renderer>,

    /// Significant digits kept per coordinate
    pub significant_digits: u32,

    /// Background color
    pub background: String,

    pub xlim: Option<[f64; 2]>,
    pub ylim: Option<[f64; 2]>,
    pub zlim: Option<[f64; 2]>,

    /// Axis titles in input order
    pub axis_labels: Option<Vec<String>>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            axis: true,
            num_ticks: Some(vec![Some(DEFAULT_NUM_TICKS); 3]),
            tick_labels: TickLabels::default(),
            color: ColorSpec::default(),
            size: SizeSpec::default(),
            labels: None,
            label_margin: "10px".to_string(),
            stroke: "black".to_string(),
            flip_vertical: true,
            grid: true,
            renderer: None,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            background: "white".to_string(),
            xlim: None,
            ylim: None,
            zlim: None,
            axis_labels: None,
        }
    }
}

impl PlotOptions {
    /// Parse a JSON option document
    pub fn from_json_str(json: &str) -> ScatterResult<Self> {
        serde_json::from_str(json).map_err(|e| ScatterError::Config(e.to_string()))
    }

    /// Parse a TOML option document
    pub fn from_toml_str(document: &str) -> ScatterResult<Self> {
        toml::from_str(document).map_err(|e| ScatterError::Config(e.to_string()))
    }

    /// Set container size
    pub fn with_size_px(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set tick counts per input axis
    pub fn with_num_ticks(mut self, counts: [Option<usize>; 3]) -> Self {
        self.num_ticks = Some(counts.to_vec());
        self
    }

    /// Disable tick generation
    pub fn without_ticks(mut self) -> Self {
        self.num_ticks = None;
        self
    }

    /// Override the generated labels of one input axis
    pub fn with_tick_labels(mut self, axis: AxisId, labels: Vec<String>) -> Self {
        match axis {
            AxisId::X => self.tick_labels.x = Some(labels),
            AxisId::Y => self.tick_labels.y = Some(labels),
            AxisId::Z => self.tick_labels.z = Some(labels),
        }
        self
    }

    /// Set point colors
    pub fn with_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    /// Set point sizes
    pub fn with_point_size(mut self, size: SizeSpec) -> Self {
        self.size = size;
        self
    }

    /// Set per-point labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Set the stroke color
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = stroke.into();
        self
    }

    /// Enable or disable the vertical flip
    pub fn with_flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = flip;
        self
    }

    /// Request a renderer explicitly
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set significant digits kept per coordinate
    pub fn with_significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Override the range of one input axis
    pub fn with_limits(mut self, axis: AxisId, min: f64, max: f64) -> Self {
        match axis {
            AxisId::X => self.xlim = Some([min, max]),
            AxisId::Y => self.ylim = Some([min, max]),
            AxisId::Z => self.zlim = Some([min, max]),
        }
        self
    }

    /// Set axis titles in input order
    pub fn with_axis_labels(mut self, x: &str, y: &str, z: &str) -> Self {
        self.axis_labels = Some(vec![x.to_string(), y.to_string(), z.to_string()]);
        self
    }

    /// Range override of one input axis
    pub fn limits(&self, axis: AxisId) -> Option<[f64; 2]> {
        match axis {
            AxisId::X => self.xlim,
            AxisId::Y => self.ylim,
            AxisId::Z => self.zlim,
        }
    }

    /// Significant digits clamped to the supported range
    pub fn effective_significant_digits(&self) -> u32 {
        self.significant_digits.clamp(1, MAX_SIGNIFICANT_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PlotOptions::default();
        assert!(options.axis);
        assert!(options.grid);
        assert!(options.flip_vertical);
        assert_eq!(options.num_ticks, Some(vec![Some(6); 3]));
        assert_eq!(options.significant_digits, 8);
        assert_eq!(options.color, ColorSpec::Uniform("steelblue".to_string()));
        assert_eq!(options.renderer, None);
    }

    #[test]
    fn test_renderer_resolution() {
        assert_eq!(Renderer::resolve(None, 3), Renderer::Canvas);
        assert_eq!(Renderer::resolve(None, 10_000), Renderer::Canvas);
        assert_eq!(Renderer::resolve(None, 10_001), Renderer::WebGl);
        assert_eq!(Renderer::resolve(Some(Renderer::Canvas), 10_001), Renderer::Canvas);
        assert_eq!(Renderer::resolve(Some(Renderer::Auto), 10_001), Renderer::Auto);
    }

    #[test]
    fn test_json_absent_vs_null_ticks() {
        let absent = PlotOptions::from_json_str("{}").unwrap();
        assert_eq!(absent.num_ticks, Some(vec![Some(6); 3]));

        let null = PlotOptions::from_json_str(r#"{"numTicks": null}"#).unwrap();
        assert_eq!(null.num_ticks, None);

        let partial = PlotOptions::from_json_str(r#"{"numTicks": [4, null, 2]}"#).unwrap();
        assert_eq!(partial.num_ticks, Some(vec![Some(4), None, Some(2)]));
    }

    #[test]
    fn test_json_camel_case_fields() {
        let options = PlotOptions::from_json_str(
            r##"{
                "flipVertical": false,
                "significantDigits": 4,
                "renderer": "webgl",
                "color": ["red", "#00ff0080"],
                "size": 2.5,
                "xlim": [0, 10],
                "tickLabels": {"y": ["a", "b"]}
            }"##,
        )
        .unwrap();
        assert!(!options.flip_vertical);
        assert_eq!(options.significant_digits, 4);
        assert_eq!(options.renderer, Some(Renderer::WebGl));
        assert_eq!(options.color.per_point_len(), Some(2));
        assert_eq!(options.size, SizeSpec::Uniform(2.5));
        assert_eq!(options.limits(AxisId::X), Some([0.0, 10.0]));
        assert_eq!(options.tick_labels.y.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_toml_document() {
        let options = PlotOptions::from_toml_str(
            r#"
            background = "black"
            grid = false
            numTicks = [3, 3, 3]
            renderer = "canvas"
            "#,
        )
        .unwrap();
        assert_eq!(options.background, "black");
        assert!(!options.grid);
        assert_eq!(options.num_ticks, Some(vec![Some(3); 3]));
        assert_eq!(options.renderer, Some(Renderer::Canvas));
    }

    #[test]
    fn test_bad_document_is_config_error() {
        let err = PlotOptions::from_json_str(r#"{"renderer": "vulkan"}"#).unwrap_err();
        assert!(matches!(err, ScatterError::Config(_)));
    }

    #[test]
    fn test_tick_labels_display_order() {
        let labels = TickLabels {
            x: Some(vec!["x".into()]),
            y: Some(vec!["y".into()]),
            z: None,
        };
        let [first, second, third] = labels.in_display_order();
        assert_eq!(first, Some(&["x".to_string()][..]));
        assert_eq!(second, None);
        assert_eq!(third, Some(&["y".to_string()][..]));
    }

    #[test]
    fn test_size_validation() {
        assert!(SizeSpec::Uniform(1.0).validate().is_ok());
        assert!(SizeSpec::Uniform(-1.0).validate().is_err());
        assert!(SizeSpec::PerPoint(vec![1.0, f64::NAN]).validate().is_err());
    }

    #[test]
    fn test_significant_digits_clamped() {
        assert_eq!(PlotOptions::default().with_significant_digits(0).effective_significant_digits(), 1);
        assert_eq!(PlotOptions::default().with_significant_digits(40).effective_significant_digits(), 17);
    }
}
