use gdal::spatial_ref::SpatialRef;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrsKind {
    Geographic,
    Projected,
    Unknown,
}

/// Classify the raster CRS. Masks are always built in lon/lat degrees, so
/// anything but a geographic CRS is reported as a warning.
pub fn check_geographic(projection_wkt: &str) -> CrsKind {
    if projection_wkt.trim().is_empty() {
        warn!("Input raster has no CRS, assuming lon/lat degrees");
        return CrsKind::Unknown;
    }

    let spatial_ref = match SpatialRef::from_wkt(projection_wkt) {
        Ok(sr) => sr,
        Err(e) => {
            warn!("Failed to parse projection WKT, assuming lon/lat degrees: {}", e);
            return CrsKind::Unknown;
        }
    };

    if spatial_ref.is_geographic() {
        info!("Geographic CRS detected (lat/lon)");
        return CrsKind::Geographic;
    }

    if spatial_ref.is_projected() {
        warn!(
            "Projected CRS detected (units={:.6}); regions are rasterized in lon/lat and will not line up",
            spatial_ref.linear_units()
        );
        return CrsKind::Projected;
    }

    warn!("Unknown CRS type, assuming lon/lat degrees");
    CrsKind::Unknown
}
