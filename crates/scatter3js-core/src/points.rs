//! Coordinate input and the validated point cloud
//!
//! Coordinates arrive either as three separate sequences or as a table with
//! three columns whose cells may still need numeric coercion. Both shapes
//! are validated into a [`PointCloud`], an N×3 array of finite values.

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

/// A table cell before numeric coercion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Coerce the cell to a number
    pub fn coerce(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Missing => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A row-major table with a declared column count
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub ncol: usize,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(ncol: usize, rows: Vec<Vec<Cell>>) -> Self {
        Self { ncol, rows }
    }

    /// Build a numeric table from fixed-width rows
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        Self {
            ncol: N,
            rows: rows
                .iter()
                .map(|row| row.iter().copied().map(Cell::Number).collect())
                .collect(),
        }
    }
}

/// Raw coordinate input
#[derive(Clone, Debug, PartialEq)]
pub enum Coordinates {
    /// Separate sequences; `y` and `z` are required
    Vectors {
        x: Vec<f64>,
        y: Option<Vec<f64>>,
        z: Option<Vec<f64>>,
    },
    /// A table that must have exactly three columns
    Table(Table),
}

impl Coordinates {
    /// Three complete sequences
    pub fn xyz(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        Coordinates::Vectors {
            x,
            y: Some(y),
            z: Some(z),
        }
    }
}

impl From<Table> for Coordinates {
    fn from(table: Table) -> Self {
        Coordinates::Table(table)
    }
}

/// Validated point cloud, one row per point
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    points: Array2<f64>,
}

impl PointCloud {
    /// Validate raw coordinates into a point cloud
    pub fn from_coordinates(coords: Coordinates) -> ScatterResult<Self> {
        let points = match coords {
            Coordinates::Vectors { x, y, z } => {
                let (Some(y), Some(z)) = (y, z) else {
                    return Err(ScatterError::validation(
                        "x, y and z must all be provided, or x must be a table with 3 columns",
                    ));
                };
                if x.len() != y.len() || x.len() != z.len() {
                    return Err(ScatterError::validation(format!(
                        "x, y and z must have equal lengths, got {}, {} and {}",
                        x.len(),
                        y.len(),
                        z.len()
                    )));
                }
                let n = x.len();
                let mut points = Array2::zeros((n, 3));
                for (col, values) in [x, y, z].into_iter().enumerate() {
                    points
                        .column_mut(col)
                        .assign(&ArrayView1::from(values.as_slice()));
                }
                points
            }
            Coordinates::Table(table) => coerce_table(&table)?,
        };

        if let Some(((row, col), value)) = points.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScatterError::validation(format!(
                "coordinate at row {row}, column {} is not finite ({value})",
                col + 1
            )));
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of one input column (0 = x, 1 = y, 2 = z)
    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.points.column(index)
    }

    /// The N×3 array with columns reordered by index
    pub fn select_columns(&self, columns: &[usize; 3]) -> Array2<f64> {
        self.points.select(Axis(1), columns)
    }
}

fn coerce_table(table: &Table) -> ScatterResult<Array2<f64>> {
    if table.ncol != 3 {
        return Err(ScatterError::validation(format!(
            "coordinate table must have exactly 3 columns, got {}",
            table.ncol
        )));
    }

    let mut points = Array2::zeros((table.rows.len(), 3));
    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != table.ncol {
            return Err(ScatterError::validation(format!(
                "row {i} has {} cells, expected {}",
                row.len(),
                table.ncol
            )));
        }
        for (j, cell) in row.iter().enumerate() {
            points[[i, j]] = cell.coerce().ok_or_else(|| {
                ScatterError::validation(format!(
                    "cell at row {i}, column {} cannot be coerced to a number: {cell:?}",
                    j + 1
                ))
            })?;
        }
    }
    Ok(points)
}

impl From<Vec<[f64; 3]>> for Coordinates {
    fn from(rows: Vec<[f64; 3]>) -> Self {
        Coordinates::Table(Table::from_rows(&rows))
    }
}
