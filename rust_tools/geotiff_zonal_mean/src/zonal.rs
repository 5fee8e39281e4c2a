use crate::error::{Result, ZonalError};
use crate::grid::{MaskGrid, RasterGrid};
use log::warn;

/// Inclusive optional bounds on data values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// How to treat data/mask grids that do not line up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchMode {
    /// Clip both grids to their common index rectangle anchored at (0, 0).
    #[default]
    Clip,
    /// Fail with `ShapeMismatch` / `ExtentMismatch`.
    Strict,
}

/// Non-fatal conditions raised while aggregating.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    ShapeMismatch {
        data: (usize, usize),
        mask: (usize, usize),
        clipped: (usize, usize),
    },
    ExtentMismatch,
    EmptyAggregation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZonalStats {
    /// Mean of qualifying cells, 0 when there were none.
    pub value: f64,
    pub count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ZonalStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Mean of `data` under `mask`, ignoring non-finite, no-data and out-of-range cells.
pub fn aggregate(
    data: &RasterGrid,
    mask: &MaskGrid,
    range: ValueRange,
    mode: MismatchMode,
) -> Result<ZonalStats> {
    let mut diagnostics = Vec::new();

    let (data_cols, data_rows) = data.shape();
    let (mask_cols, mask_rows) = mask.shape();
    let cols = data_cols.min(mask_cols);
    let rows = data_rows.min(mask_rows);

    if (data_cols, data_rows) != (mask_cols, mask_rows) {
        if mode == MismatchMode::Strict {
            return Err(ZonalError::ShapeMismatch {
                data_cols,
                data_rows,
                mask_cols,
                mask_rows,
            });
        }
        warn!(
            "Data grid {}x{} and mask grid {}x{} differ, clipping to {}x{}",
            data_cols, data_rows, mask_cols, mask_rows, cols, rows
        );
        diagnostics.push(Diagnostic::ShapeMismatch {
            data: (data_cols, data_rows),
            mask: (mask_cols, mask_rows),
            clipped: (cols, rows),
        });
    }

    if let Some(extent) = &data.extent {
        if !extent.is_aligned_with(&mask.extent) {
            if mode == MismatchMode::Strict {
                return Err(ZonalError::ExtentMismatch(format!(
                    "data {:?} vs mask {:?}",
                    extent, mask.extent
                )));
            }
            warn!(
                "Data grid extent {:?} is not aligned with mask extent {:?}, aggregating by index",
                extent, mask.extent
            );
            diagnostics.push(Diagnostic::ExtentMismatch);
        }
    }

    let mut sum = 0.0f64;
    let mut count = 0usize;

    for row in 0..rows {
        for col in 0..cols {
            if mask.data[[row, col]] == MaskGrid::NODATA {
                continue;
            }
            let value = data.data[[row, col]];
            if !data.is_valid(value) || !range.contains(value) {
                continue;
            }
            sum += value;
            count += 1;
        }
    }

    let value = if count > 0 {
        sum / count as f64
    } else {
        warn!("No cells qualified for aggregation, using 0");
        diagnostics.push(Diagnostic::EmptyAggregation);
        0.0
    };

    Ok(ZonalStats {
        value,
        count,
        diagnostics,
    })
}

/// `aggregate` in clipping mode, returning only the mean.
pub fn zonal_mean(data: &RasterGrid, mask: &MaskGrid, min: Option<f64>, max: Option<f64>) -> f64 {
    match aggregate(data, mask, ValueRange::new(min, max), MismatchMode::Clip) {
        Ok(stats) => stats.value,
        // Clip mode never fails
        Err(_) => 0.0,
    }
}
