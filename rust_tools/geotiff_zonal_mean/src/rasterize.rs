use crate::error::{Result, ZonalError};
use crate::extent::GeoExtent;
use crate::geometry::{PolygonRegion, RegionGeometry};
use crate::grid::MaskGrid;
use gdal::raster::RasterizeOptions;
use gdal::vector::Geometry;
use gdal::DriverManager;
use log::debug;
use ndarray::Array2;

/// Produces a binary coverage array (`[row, col]`, 0/1) for a geometry over a regular grid.
pub trait CoverageRasterizer: Send + Sync {
    fn coverage(
        &self,
        geometry: &RegionGeometry,
        extent: &GeoExtent,
        column_count: usize,
        row_count: usize,
    ) -> Result<Array2<u8>>;
}

/// Burns through GDAL's rasterizer into an in-memory dataset.
///
/// Pixels whose centre falls inside the geometry are burned; with `all_touched`,
/// every pixel the boundary passes through is burned as well. Each part of a
/// multipolygon is burned separately, so overlapping parts stay inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalRasterizer {
    pub all_touched: bool,
}

/// Rasterize a region onto the full-world grid of the given shape.
pub fn rasterize(region: &PolygonRegion, column_count: usize, row_count: usize) -> Result<MaskGrid> {
    rasterize_with(region, column_count, row_count, None, &GdalRasterizer::default())
}

/// Rasterize a region onto an explicit extent, defaulting to the full world.
pub fn rasterize_with(
    region: &PolygonRegion,
    column_count: usize,
    row_count: usize,
    extent: Option<GeoExtent>,
    rasterizer: &dyn CoverageRasterizer,
) -> Result<MaskGrid> {
    if column_count == 0 || row_count == 0 {
        return Err(ZonalError::InvalidShape(column_count, row_count));
    }
    region.geometry.validate()?;

    let extent = extent.unwrap_or_else(|| GeoExtent::world(column_count, row_count));
    let data = rasterizer.coverage(&region.geometry, &extent, column_count, row_count)?;

    let mask = MaskGrid { data, extent };
    debug!(
        "Rasterized region '{}': {} of {} cells inside",
        region.id,
        mask.covered_cells(),
        column_count * row_count
    );
    Ok(mask)
}

impl CoverageRasterizer for GdalRasterizer {
    fn coverage(
        &self,
        geometry: &RegionGeometry,
        extent: &GeoExtent,
        column_count: usize,
        row_count: usize,
    ) -> Result<Array2<u8>> {
        let driver = DriverManager::get_driver_by_name("MEM")?;
        let mut dataset = driver.create_with_band_type::<u8, _>("", column_count, row_count, 1)?;
        dataset.set_geo_transform(&extent.to_geotransform())?;

        let shape = Geometry::from_wkt(&geometry.to_wkt())?;
        let options = RasterizeOptions {
            all_touched: self.all_touched,
            ..Default::default()
        };
        gdal::raster::rasterize(&mut dataset, &[1], &[shape], &[MaskGrid::INSIDE as f64], Some(options))?;

        let band = dataset.rasterband(1)?;
        let buffer = band.read_as::<u8>((0, 0), (column_count, row_count), (column_count, row_count), None)?;
        let data: Vec<u8> = buffer.into_iter().collect();
        Ok(Array2::from_shape_vec((row_count, column_count), data)?)
    }
}
