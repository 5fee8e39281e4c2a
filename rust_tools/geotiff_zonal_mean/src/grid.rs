use crate::extent::GeoExtent;
use ndarray::Array2;

/// Single-band data raster, indexed `[row, col]`.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    pub data: Array2<f64>,
    pub extent: Option<GeoExtent>,
    pub nodata: Option<f64>,
}

impl RasterGrid {
    pub fn new(data: Array2<f64>) -> Self {
        Self {
            data,
            extent: None,
            nodata: None,
        }
    }

    pub fn with_extent(mut self, extent: GeoExtent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_nodata(mut self, nodata: Option<f64>) -> Self {
        self.nodata = nodata;
        self
    }

    /// (columns, rows)
    pub fn shape(&self) -> (usize, usize) {
        let (rows, cols) = self.data.dim();
        (cols, rows)
    }

    /// A cell counts as a measurement when it is finite and not the sentinel.
    pub fn is_valid(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.nodata {
            Some(nd) => value != nd,
            None => true,
        }
    }
}

/// Binary coverage raster for one region. 0 = outside, 1 = inside.
///
/// The no-data sentinel of a mask is always 0.
#[derive(Debug, Clone)]
pub struct MaskGrid {
    pub data: Array2<u8>,
    pub extent: GeoExtent,
}

impl MaskGrid {
    pub const NODATA: u8 = 0;
    pub const INSIDE: u8 = 1;

    pub fn shape(&self) -> (usize, usize) {
        let (rows, cols) = self.data.dim();
        (cols, rows)
    }

    pub fn covered_cells(&self) -> usize {
        self.data.iter().filter(|&&v| v != Self::NODATA).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_shape_is_cols_rows() {
        let grid = RasterGrid::new(arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]));
        assert_eq!(grid.shape(), (3, 2));
    }

    #[test]
    fn test_is_valid_excludes_nodata_and_nan() {
        let grid = RasterGrid::new(arr2(&[[0.0]])).with_nodata(Some(-9999.0));
        assert!(grid.is_valid(1.5));
        assert!(!grid.is_valid(-9999.0));
        assert!(!grid.is_valid(f64::NAN));
        assert!(!grid.is_valid(f64::INFINITY));
    }

    #[test]
    fn test_covered_cells() {
        let mask = MaskGrid {
            data: arr2(&[[0, 1], [1, 1]]),
            extent: GeoExtent::world(2, 2),
        };
        assert_eq!(mask.covered_cells(), 3);
    }
}
