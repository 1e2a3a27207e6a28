//! Scatterplot payload builder
//!
//! [`PlotDataBuilder`] validates coordinates and options, rescales the
//! points into the unit cube, generates axis ticks and assembles an
//! immutable [`RenderSpec`]. All validation happens before anything is
//! assembled, so a failed build never yields a partial payload.

use crate::axis::{to_display_axis_order, AxisId, AxisRange, TickSet, FLIPPED_DISPLAY_AXIS};
use crate::color::sanitize_color;
use crate::error::{validation, ScatterResult};
use crate::normalize::{flatten_row_major, normalize_points};
use crate::options::{PlotOptions, Renderer, SizeSpec, TickLabels, MAX_NUM_TICKS};
use crate::payload::{RenderSpec, VisualAttributes};
use crate::points::{Coordinates, PointCloud};

/// Builds [`RenderSpec`]s from raw coordinates
#[derive(Clone, Debug, Default)]
pub struct PlotDataBuilder {
    options: PlotOptions,
}

impl PlotDataBuilder {
    pub fn new(options: PlotOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Validate and transform coordinates into a render spec
    pub fn build(&self, coords: impl Into<Coordinates>) -> ScatterResult<RenderSpec> {
        let options = &self.options;
        let cloud = PointCloud::from_coordinates(coords.into())?;
        let n = cloud.len();

        let visual = sanitize_visual(options, n)?;
        let tick_counts = options
            .num_ticks
            .as_deref()
            .map(tick_counts_in_display_order)
            .transpose()?;
        let axis_labels = axis_labels_in_display_order(options.axis_labels.as_deref())?;

        let [rx, rz, ry] = AxisId::display_order().map(|axis| {
            AxisRange::resolve(axis, cloud.column(axis_index(axis)).iter().copied(), options.limits(axis))
        });
        let ranges = [rx?, rz?, ry?];

        let ticks = match tick_counts {
            Some(counts) => build_ticks(&ranges, counts, options.flip_vertical, &options.tick_labels)?,
            None => {
                if !options.tick_labels.is_empty() {
                    tracing::warn!("tick labels supplied but tick generation is disabled; ignoring them");
                }
                [None, None, None]
            }
        };

        let renderer = Renderer::resolve(options.renderer, n);
        if renderer == Renderer::WebGl && visual.size.per_point_len().is_some() {
            tracing::warn!("per-point sizes are not supported by the webgl renderer and may be ignored");
        }

        let points = normalize_points(
            &cloud,
            &ranges,
            options.flip_vertical,
            options.effective_significant_digits(),
        );
        let data = flatten_row_major(&points);

        tracing::debug!(points = n, renderer = renderer.as_str(), "built scatterplot payload");

        Ok(RenderSpec {
            data,
            point_count: n,
            ranges,
            ticks,
            axis_labels,
            visual,
            renderer,
            options: options.clone(),
        })
    }
}

fn axis_index(axis: AxisId) -> usize {
    match axis {
        AxisId::X => 0,
        AxisId::Y => 1,
        AxisId::Z => 2,
    }
}

fn sanitize_visual(options: &PlotOptions, n: usize) -> ScatterResult<VisualAttributes> {
    let color = options.color.sanitized()?;
    if let Some(len) = color.per_point_len() {
        validation::validate_point_count("color", len, n)?;
    }

    options.size.validate()?;
    if let SizeSpec::PerPoint(sizes) = &options.size {
        validation::validate_point_count("size", sizes.len(), n)?;
    }

    if let Some(labels) = &options.labels {
        validation::validate_point_count("labels", labels.len(), n)?;
    }

    Ok(VisualAttributes {
        color,
        size: options.size.clone(),
        labels: options.labels.clone(),
        stroke: sanitize_color(&options.stroke)?,
        background: sanitize_color(&options.background)?,
    })
}

fn tick_counts_in_display_order(counts: &[Option<usize>]) -> ScatterResult<[Option<usize>; 3]> {
    validation::validate_axis_count("numTicks", counts.len())?;
    for (axis, count) in AxisId::ALL.into_iter().zip(counts) {
        if let Some(count) = *count {
            validation::validate_tick_count(axis, count, MAX_NUM_TICKS)?;
        }
    }
    Ok(to_display_axis_order([counts[0], counts[1], counts[2]]))
}

fn axis_labels_in_display_order(labels: Option<&[String]>) -> ScatterResult<Option<[String; 3]>> {
    let Some(labels) = labels else {
        return Ok(None);
    };
    validation::validate_axis_count("axisLabels", labels.len())?;
    Ok(Some(to_display_axis_order([
        labels[0].clone(),
        labels[1].clone(),
        labels[2].clone(),
    ])))
}

/// Ticks per display slot.
///
/// Label overrides are keyed by input axis and permuted like the counts, so
/// the input `y` labels land in the third display slot.
fn build_ticks(
    ranges: &[AxisRange; 3],
    counts: [Option<usize>; 3],
    flip_vertical: bool,
    overrides: &TickLabels,
) -> ScatterResult<[Option<TickSet>; 3]> {
    let mut ticks: [Option<TickSet>; 3] = [None, None, None];
    let overrides = overrides.in_display_order();

    for (slot, range) in ranges.iter().enumerate() {
        let Some(count) = counts[slot] else {
            if overrides[slot].is_some() {
                tracing::warn!(axis = %range.axis, "tick labels supplied for an axis without ticks; ignoring them");
            }
            continue;
        };

        let mut set = TickSet::generate(range, count);
        if flip_vertical && slot == FLIPPED_DISPLAY_AXIS {
            set.reverse_labels();
        }
        if let Some(labels) = overrides[slot] {
            set.replace_labels(range.axis, labels)?;
        }
        ticks[slot] = Some(set);
    }

    Ok(ticks)
}
