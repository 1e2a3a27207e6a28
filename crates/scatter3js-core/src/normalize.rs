//! Coordinate normalization into the unit cube
//!
//! Points are reordered into display axis order, rescaled per axis into
//! `[0, 1]`, optionally flipped on the vertical display axis, rounded to a
//! number of significant digits and flattened row-major for the wire.

use ndarray::Array2;

use crate::axis::{display_columns, AxisRange, FLIPPED_DISPLAY_AXIS};
use crate::points::PointCloud;

/// Round to `digits` significant digits
pub fn signif(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let power = digits.max(1) as i32 - 1 - magnitude;
    // 10^-n is inexact; divide by 10^n instead
    if power < 0 {
        let step = 10f64.powi(-power);
        return (value / step).round() * step;
    }
    let scale = 10f64.powi(power);
    if !scale.is_finite() {
        return value;
    }
    (value * scale).round() / scale
}

/// Rescale a point cloud into the unit cube.
///
/// `ranges` are in display order, matching the reordered columns.
pub fn normalize_points(
    cloud: &PointCloud,
    ranges: &[AxisRange; 3],
    flip_vertical: bool,
    digits: u32,
) -> Array2<f64> {
    let mut points = cloud.select_columns(&display_columns());

    for (col, range) in ranges.iter().enumerate() {
        let flip = flip_vertical && col == FLIPPED_DISPLAY_AXIS;
        points.column_mut(col).mapv_inplace(|v| {
            let scaled = range.normalize(v);
            let scaled = if flip { 1.0 - scaled } else { scaled };
            signif(scaled, digits)
        });
    }

    points
}

/// Flatten an N×3 array as `x0, y0, z0, x1, ...`
pub fn flatten_row_major(points: &Array2<f64>) -> Vec<f64> {
    points.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisId;
    use crate::points::Coordinates;

    fn unit_ranges() -> [AxisRange; 3] {
        AxisId::display_order().map(|axis| AxisRange::new(axis, 0.0, 2.0).unwrap())
    }

    #[test]
    fn test_signif() {
        assert_eq!(signif(0.123456789, 3), 0.123);
        assert_eq!(signif(123456.0, 2), 120000.0);
        assert_eq!(signif(0.0, 8), 0.0);
        assert_eq!(signif(1.0, 8), 1.0);
        assert_eq!(signif(1.0 / 3.0, 8), 0.33333333);
    }

    #[test]
    fn test_worked_example() {
        let coords: Coordinates = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]].into();
        let cloud = PointCloud::from_coordinates(coords).unwrap();
        let points = normalize_points(&cloud, &unit_ranges(), true, 8);
        assert_eq!(
            flatten_row_major(&points),
            vec![0.0, 0.0, 1.0, 0.5, 0.5, 0.5, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_reorder_puts_input_z_second() {
        let coords: Coordinates = vec![[0.0, 0.0, 2.0]].into();
        let cloud = PointCloud::from_coordinates(coords).unwrap();
        let points = normalize_points(&cloud, &unit_ranges(), false, 8);
        assert_eq!(flatten_row_major(&points), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_flip_only_affects_input_y() {
        let coords: Coordinates = vec![[0.5, 0.5, 0.5]].into();
        let cloud = PointCloud::from_coordinates(coords).unwrap();
        let plain = normalize_points(&cloud, &unit_ranges(), false, 8);
        let flipped = normalize_points(&cloud, &unit_ranges(), true, 8);
        assert_eq!(plain.row(0).to_vec(), vec![0.25, 0.25, 0.25]);
        assert_eq!(flipped.row(0).to_vec(), vec![0.25, 0.25, 0.75]);
    }
}
