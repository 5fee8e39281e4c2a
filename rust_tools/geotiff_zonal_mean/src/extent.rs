use crate::error::{Result, ZonalError};

/// Relative tolerance used when comparing two extents for alignment.
const ALIGN_TOLERANCE: f64 = 1e-6;

/// Axis-aligned lon/lat extent of a pixel grid.
///
/// `pixel_height` is negative: row indices grow southwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoExtent {
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GeoExtent {
    pub fn new(origin_lon: f64, origin_lat: f64, pixel_width: f64, pixel_height: f64) -> Result<Self> {
        if pixel_width == 0.0 || !pixel_width.is_finite() {
            return Err(ZonalError::InvalidPixelSize(pixel_width));
        }
        if pixel_height == 0.0 || !pixel_height.is_finite() {
            return Err(ZonalError::InvalidPixelSize(pixel_height));
        }
        Ok(Self {
            origin_lon,
            origin_lat,
            pixel_width,
            pixel_height,
        })
    }

    /// Full-globe extent: lon [-180, 180], lat [90, -90] split into the given shape.
    ///
    /// Callers must pass positive counts; `rasterize` validates them first.
    pub fn world(column_count: usize, row_count: usize) -> Self {
        Self {
            origin_lon: -180.0,
            origin_lat: 90.0,
            pixel_width: 360.0 / column_count as f64,
            pixel_height: -(180.0 / row_count as f64),
        }
    }

    /// Build from a GDAL geotransform. Rotation terms are ignored.
    pub fn from_geotransform(gt: &[f64; 6]) -> Result<Self> {
        Self::new(gt[0], gt[3], gt[1], gt[5])
    }

    pub fn to_geotransform(&self) -> [f64; 6] {
        [
            self.origin_lon,
            self.pixel_width,
            0.0,
            self.origin_lat,
            0.0,
            self.pixel_height,
        ]
    }

    /// True when both extents put pixel (0,0) at the same place with the same pixel size.
    pub fn is_aligned_with(&self, other: &GeoExtent) -> bool {
        let close = |a: f64, b: f64, scale: f64| (a - b).abs() <= ALIGN_TOLERANCE * scale.abs().max(1.0);
        close(self.pixel_width, other.pixel_width, self.pixel_width)
            && close(self.pixel_height, other.pixel_height, self.pixel_height)
            && close(self.origin_lon, other.origin_lon, self.pixel_width)
            && close(self.origin_lat, other.origin_lat, self.pixel_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_extent_pixel_size() {
        let extent = GeoExtent::world(4320, 2160);
        assert!((extent.pixel_width - 0.083333333).abs() < 1e-6);
        assert!((extent.pixel_height + 0.083333333).abs() < 1e-6);
        assert_eq!(extent.origin_lon, -180.0);
        assert_eq!(extent.origin_lat, 90.0);
    }

    #[test]
    fn test_geotransform_round_trip() {
        let gt = [-180.0, 0.5, 0.0, 90.0, 0.0, -0.5];
        let extent = GeoExtent::from_geotransform(&gt).unwrap();
        assert_eq!(extent.to_geotransform(), gt);
    }

    #[test]
    fn test_zero_pixel_size_rejected() {
        assert!(GeoExtent::new(0.0, 0.0, 0.0, -1.0).is_err());
        assert!(GeoExtent::new(0.0, 0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_alignment() {
        let a = GeoExtent::world(4320, 2160);
        // Truncated pixel size as written by older tooling still aligns
        let b = GeoExtent::new(-180.0, 90.0, 0.0833333333, -0.0833333333).unwrap();
        assert!(a.is_aligned_with(&b));

        let shifted = GeoExtent::new(-170.0, 90.0, a.pixel_width, a.pixel_height).unwrap();
        assert!(!a.is_aligned_with(&shifted));
    }
}
