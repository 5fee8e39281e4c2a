use crate::error::{Result, ZonalError};
use crate::extent::GeoExtent;
use crate::grid::{MaskGrid, RasterGrid};
use gdal::raster::RasterBand;
use gdal::{Dataset, DriverManager, Metadata};
use log::{debug, info};
use ndarray::Array2;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub geotransform: [f64; 6],
    pub projection: String,
    pub nodata: Option<f64>,
}

/// Quick look at a raster without running any aggregation.
#[derive(Debug, Clone)]
pub struct RasterSummary {
    pub metadata: RasterMetadata,
    pub band_metadata: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub valid_cells: usize,
}

fn band_metadata(dataset: &Dataset) -> Result<RasterMetadata> {
    let rasterband: RasterBand = dataset.rasterband(1)?;

    let width = rasterband.x_size() as usize;
    let height = rasterband.y_size() as usize;

    if width == 0 || height == 0 {
        return Err(ZonalError::InvalidDimensions(width, height));
    }

    let geotransform = dataset.geo_transform()?;
    // Validates pixel sizes
    GeoExtent::from_geotransform(&geotransform)?;

    Ok(RasterMetadata {
        width,
        height,
        geotransform,
        projection: dataset.projection(),
        nodata: rasterband.no_data_value(),
    })
}

/// Read band 1 of a raster as f64 together with its metadata
pub fn read_raster<P: AsRef<Path>>(path: P) -> Result<(RasterGrid, RasterMetadata)> {
    let path = path.as_ref();
    info!("Opening input raster: {}", path.display());
    let dataset = Dataset::open(path)?;
    let metadata = band_metadata(&dataset)?;

    debug!("Raster dimensions: {}x{}", metadata.width, metadata.height);
    debug!(
        "Pixel size: {:.6} x {:.6}",
        metadata.geotransform[1], metadata.geotransform[5]
    );

    let rasterband = dataset.rasterband(1)?;
    let (width, height) = (metadata.width, metadata.height);
    let buffer = rasterband.read_as::<f64>((0, 0), (width, height), (width, height), None)?;
    let data_vec: Vec<f64> = buffer.into_iter().collect();
    let data = Array2::from_shape_vec((height, width), data_vec)?;

    let grid = RasterGrid::new(data)
        .with_extent(GeoExtent::from_geotransform(&metadata.geotransform)?)
        .with_nodata(metadata.nodata);

    Ok((grid, metadata))
}

/// Write a mask as a single-band Byte GeoTIFF with no-data 0
pub fn write_mask<P: AsRef<Path>>(path: P, mask: &MaskGrid, projection: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing mask raster: {}", path.display());

    let (width, height) = mask.shape();
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<u8, _>(path, width, height, 1)?;

    dataset.set_geo_transform(&mask.extent.to_geotransform())?;
    if let Some(wkt) = projection {
        if !wkt.is_empty() {
            dataset.set_projection(wkt)?;
        }
    }

    let mut band = dataset.rasterband(1)?;
    band.set_no_data_value(Some(MaskGrid::NODATA as f64))?;

    let values: Vec<u8> = mask.data.iter().copied().collect();
    let mut buffer = gdal::raster::Buffer::new((width, height), values);
    band.write((0, 0), (width, height), &mut buffer)?;

    Ok(())
}

/// Metadata, no-data and value range of band 1.
///
/// `nodata_override` replaces the file's own sentinel, as `--nodata` does for aggregation.
pub fn summarize_raster<P: AsRef<Path>>(path: P, nodata_override: Option<f64>) -> Result<RasterSummary> {
    let path = path.as_ref();
    let dataset = Dataset::open(path)?;
    let band_metadata_entries = dataset
        .rasterband(1)?
        .metadata_domain("")
        .unwrap_or_default();

    let (mut grid, mut metadata) = read_raster(path)?;
    if nodata_override.is_some() {
        grid.nodata = nodata_override;
        metadata.nodata = nodata_override;
    }

    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    let mut valid_cells = 0usize;
    for &value in grid.data.iter() {
        if !grid.is_valid(value) {
            continue;
        }
        valid_cells += 1;
        min = Some(min.map_or(value, |m| m.min(value)));
        max = Some(max.map_or(value, |m| m.max(value)));
    }

    Ok(RasterSummary {
        metadata,
        band_metadata: band_metadata_entries,
        min,
        max,
        valid_cells,
    })
}
