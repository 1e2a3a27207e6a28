//! scatter3js-core - Data preparation for three.js 3D scatterplot widgets
//!
//! This crate turns raw point coordinates and plot options into the JSON
//! payload a browser-side three.js scatterplot widget renders. It does no
//! rendering itself.
//!
//! # Key Components
//!
//! - **PointCloud**: validated N×3 coordinates from vectors or a table
//! - **PlotOptions**: explicit configuration record, parseable from JSON or TOML
//! - **PlotDataBuilder**: normalization into the unit cube, ticks, color sanitization
//! - **RenderSpec**: the immutable result, convertible to the wire payload
//! - **WidgetHost**: the seam to whatever displays the payload
//!
//! # Axis order
//!
//! The widget draws the third input axis vertically, so per-axis data is
//! reordered from `(x, y, z)` to `(x, z, y)` by [`to_display_axis_order`].
//! Tick and axis-label fields in the payload follow display order.
//!
//! # Example
//!
//! ```
//! use scatter3js_core::{PlotDataBuilder, PlotOptions, Renderer};
//!
//! let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
//! let spec = PlotDataBuilder::new(PlotOptions::default()).build(points).unwrap();
//!
//! assert_eq!(spec.data(), &[0.0, 0.0, 1.0, 0.5, 0.5, 0.5, 1.0, 1.0, 0.0]);
//! assert_eq!(spec.renderer(), Renderer::Canvas);
//! ```

pub mod axis;
pub mod builder;
pub mod color;
pub mod error;
pub mod host;
pub mod normalize;
pub mod options;
pub mod payload;
pub mod points;

pub use axis::{to_display_axis_order, AxisId, AxisRange, TickMark, TickSet};
pub use builder::PlotDataBuilder;
pub use color::{sanitize_color, ColorSpec};
pub use error::{ScatterError, ScatterResult};
pub use host::{
    render_scatterplot, HtmlDocument, HtmlDocumentHost, SizingPolicy, WidgetHost, WidgetRequest,
    WIDGET_NAME,
};
pub use options::{PlotOptions, Renderer, SizeSpec, TickLabels};
pub use payload::{OptionField, RenderSpec, VisualAttributes, WidgetPayload};
pub use points::{Cell, Coordinates, PointCloud, Table};
