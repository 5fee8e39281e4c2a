use crate::error::{Result, ZonalError};
use crate::geometry::{Polygon, PolygonRegion, RegionGeometry};
use gdal::vector::{Geometry, LayerAccess, OGRwkbGeometryType};
use gdal::Dataset;
use log::{debug, info, warn};
use std::path::Path;

/// Regions read from the first layer of a vector file.
#[derive(Debug, Clone)]
pub struct RegionLayer {
    pub feature_count: u64,
    pub regions: Vec<PolygonRegion>,
    pub skipped: usize,
}

/// Identifiers must be non-empty and start with a letter or digit.
pub fn is_usable_id(id: &str) -> bool {
    id.chars().next().map_or(false, |c| c.is_alphanumeric())
}

/// Read every feature of the first layer as a region keyed by `id_field`.
///
/// Features with an unusable identifier are skipped. Features whose geometry is
/// missing or not (multi)polygonal are kept with an empty geometry so the
/// failure surfaces for that region alone.
pub fn read_regions<P: AsRef<Path>>(path: P, id_field: &str) -> Result<RegionLayer> {
    let path = path.as_ref();
    info!("Opening region layer: {}", path.display());
    let dataset = Dataset::open(path)?;
    let mut layer = dataset.layer(0)?;

    let has_field = layer.defn().fields().any(|field| field.name() == id_field);
    if !has_field {
        return Err(ZonalError::MissingField(id_field.to_string()));
    }

    let feature_count = layer.feature_count();
    info!("Found {} features", feature_count);

    let mut regions = Vec::new();
    let mut skipped = 0usize;
    for feature in layer.features() {
        let id = match feature.field_as_string_by_name(id_field)? {
            Some(id) if is_usable_id(&id) => id,
            other => {
                debug!("Skipping feature {:?} with unusable identifier {:?}", feature.fid(), other);
                skipped += 1;
                continue;
            }
        };

        let geometry = match feature.geometry() {
            Some(geom) => convert_geometry(geom),
            None => {
                warn!("Feature '{}' has no geometry", id);
                RegionGeometry::default()
            }
        };
        regions.push(PolygonRegion::new(id, geometry));
    }

    Ok(RegionLayer {
        feature_count,
        regions,
        skipped,
    })
}

fn convert_polygon(geom: &Geometry) -> Polygon {
    (0..geom.geometry_count())
        .map(|i| {
            geom.get_geometry(i)
                .get_point_vec()
                .into_iter()
                .map(|(x, y, _)| (x, y))
                .collect()
        })
        .collect()
}

/// Polygon and MultiPolygon become a `RegionGeometry`; anything else is empty.
pub fn convert_geometry(geom: &Geometry) -> RegionGeometry {
    match geom.geometry_type() {
        OGRwkbGeometryType::wkbPolygon | OGRwkbGeometryType::wkbPolygon25D => {
            RegionGeometry::from_polygon(convert_polygon(geom))
        }
        OGRwkbGeometryType::wkbMultiPolygon | OGRwkbGeometryType::wkbMultiPolygon25D => RegionGeometry {
            polygons: (0..geom.geometry_count())
                .map(|i| convert_polygon(&geom.get_geometry(i)))
                .collect(),
        },
        other => {
            warn!("Unsupported geometry type {}, treating as empty", other);
            RegionGeometry::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_usable_id() {
        assert!(is_usable_id("AFG"));
        assert!(is_usable_id("9A"));
        assert!(!is_usable_id(""));
        assert!(!is_usable_id("-99"));
        assert!(!is_usable_id(" X"));
    }

    #[test]
    fn test_convert_polygon_with_hole() {
        let geom = Geometry::from_wkt(
            "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0), (4 4, 6 4, 6 6, 4 6, 4 4))",
        )
        .unwrap();
        let region = convert_geometry(&geom);
        assert_eq!(region.polygons.len(), 1);
        assert_eq!(region.polygons[0].len(), 2);
        assert_eq!(region.polygons[0][0][1], (10.0, 0.0));
        assert!(region.validate().is_ok());
    }

    #[test]
    fn test_convert_multipolygon() {
        let geom = Geometry::from_wkt(
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)))",
        )
        .unwrap();
        let region = convert_geometry(&geom);
        assert_eq!(region.polygons.len(), 2);
        assert_eq!(region.polygons[0][0][1], (1.0, 0.0));
        assert_eq!(region.polygons[1][0][0], (5.0, 5.0));
        assert!(region.validate().is_ok());
    }

    #[test]
    fn test_convert_point_is_empty() {
        let geom = Geometry::from_wkt("POINT (1 2)").unwrap();
        let region = convert_geometry(&geom);
        assert!(region.is_empty());
        assert!(region.validate().is_err());
    }

    #[test]
    fn test_wkt_survives_gdal_round_trip() {
        let original = RegionGeometry::rectangle(-10.0, -5.0, 10.0, 5.0);
        let geom = Geometry::from_wkt(&original.to_wkt()).unwrap();
        assert_eq!(convert_geometry(&geom), original);
    }
}
