use crate::error::{Result, ZonalError};
use std::fmt::Write;

/// Closed ring of (lon, lat) vertices. The closing vertex may or may not repeat the first.
pub type Ring = Vec<(f64, f64)>;

/// Exterior ring followed by zero or more holes.
pub type Polygon = Vec<Ring>;

/// Multipolygon boundary of a region in lon/lat degrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionGeometry {
    pub polygons: Vec<Polygon>,
}

/// One named feature of the region layer.
#[derive(Debug, Clone)]
pub struct PolygonRegion {
    pub id: String,
    pub geometry: RegionGeometry,
}

impl PolygonRegion {
    pub fn new(id: impl Into<String>, geometry: RegionGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }
}

fn distinct_vertices(ring: &Ring) -> usize {
    let mut count = ring.len();
    if count > 1 && ring.first() == ring.last() {
        count -= 1;
    }
    count
}

impl RegionGeometry {
    pub fn from_polygon(polygon: Polygon) -> Self {
        Self {
            polygons: vec![polygon],
        }
    }

    /// Axis-aligned rectangle as a single-ring geometry.
    #[cfg(test)]
    pub fn rectangle(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self::from_polygon(vec![vec![
            (min_lon, min_lat),
            (max_lon, min_lat),
            (max_lon, max_lat),
            (min_lon, max_lat),
            (min_lon, min_lat),
        ]])
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.is_empty())
    }

    /// Reject boundaries no rasterizer can burn. Topology is not checked.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ZonalError::InvalidGeometry("geometry has no polygons".to_string()));
        }
        for (p, polygon) in self.polygons.iter().enumerate() {
            if polygon.is_empty() {
                return Err(ZonalError::InvalidGeometry(format!("polygon {} has no rings", p)));
            }
            for (r, ring) in polygon.iter().enumerate() {
                if distinct_vertices(ring) < 3 {
                    return Err(ZonalError::InvalidGeometry(format!(
                        "polygon {} ring {} has {} vertices (need at least 3)",
                        p,
                        r,
                        distinct_vertices(ring)
                    )));
                }
                if ring.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
                    return Err(ZonalError::InvalidGeometry(format!(
                        "polygon {} ring {} has a non-finite coordinate",
                        p, r
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn to_wkt(&self) -> String {
        let mut wkt = String::from("MULTIPOLYGON (");
        for (p, polygon) in self.polygons.iter().enumerate() {
            if p > 0 {
                wkt.push_str(", ");
            }
            wkt.push('(');
            for (r, ring) in polygon.iter().enumerate() {
                if r > 0 {
                    wkt.push_str(", ");
                }
                wkt.push('(');
                let mut closed = ring.clone();
                if closed.first() != closed.last() {
                    if let Some(&first) = closed.first() {
                        closed.push(first);
                    }
                }
                for (i, (x, y)) in closed.iter().enumerate() {
                    if i > 0 {
                        wkt.push_str(", ");
                    }
                    let _ = write!(wkt, "{} {}", x, y);
                }
                wkt.push(')');
            }
            wkt.push(')');
        }
        wkt.push(')');
        wkt
    }
}
