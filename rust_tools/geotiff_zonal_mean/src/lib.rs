// Library exports for testing and reuse

pub mod batch;
pub mod cli;
pub mod config;
pub mod crs;
pub mod error;
pub mod extent;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod rasterize;
pub mod report;
pub mod vector;
pub mod zonal;

// Re-export commonly used types
pub use batch::{compute_zonal_means, AggregationResult, BatchOptions, MaskExtent, RegionOutcome};
pub use error::{Result, ZonalError};
pub use extent::GeoExtent;
pub use geometry::{PolygonRegion, RegionGeometry};
pub use grid::{MaskGrid, RasterGrid};
pub use io::{read_raster, write_mask, RasterMetadata};
pub use rasterize::{rasterize, rasterize_with, CoverageRasterizer, GdalRasterizer};
pub use vector::read_regions;
pub use zonal::{aggregate, zonal_mean, Diagnostic, MismatchMode, ValueRange, ZonalStats};
