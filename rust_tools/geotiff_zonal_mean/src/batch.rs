use crate::error::Result;
use crate::extent::GeoExtent;
use crate::geometry::PolygonRegion;
use crate::grid::RasterGrid;
use crate::io;
use crate::rasterize::{rasterize_with, CoverageRasterizer};
use crate::zonal::{aggregate, MismatchMode, ValueRange, ZonalStats};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::PathBuf;

/// Which extent region masks are burned onto.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum MaskExtent {
    /// Full globe at the data grid's shape.
    #[default]
    World,
    /// The data grid's own geotransform.
    DataGrid,
    Explicit(GeoExtent),
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub range: ValueRange,
    pub mode: MismatchMode,
    pub mask_extent: MaskExtent,
    /// Write `<id>.tif` for every rasterized region
    pub mask_dir: Option<PathBuf>,
    pub projection: Option<String>,
}

/// Outcome for one region; failures stay local to the region.
#[derive(Debug)]
pub struct RegionOutcome {
    pub id: String,
    pub result: Result<ZonalStats>,
}

/// A (location, mean) row of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub location: String,
    pub value: f64,
}

/// File name for a region mask. Anything but letters, digits, `-`, `_` and `.`
/// becomes `_`, and a leading dot is escaped, so the file stays inside the mask directory.
pub fn mask_file_name(id: &str) -> String {
    let mut name: String = id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with('.') {
        name.insert(0, '_');
    }
    name.push_str(".tif");
    name
}

fn process_region(
    data: &RasterGrid,
    region: &PolygonRegion,
    rasterizer: &dyn CoverageRasterizer,
    options: &BatchOptions,
) -> Result<ZonalStats> {
    let (cols, rows) = data.shape();
    let extent = match options.mask_extent {
        MaskExtent::World => None,
        MaskExtent::DataGrid => data.extent,
        MaskExtent::Explicit(extent) => Some(extent),
    };

    let mask = rasterize_with(region, cols, rows, extent, rasterizer)?;

    if let Some(dir) = &options.mask_dir {
        let path = dir.join(mask_file_name(&region.id));
        if let Err(e) = io::write_mask(&path, &mask, options.projection.as_deref()) {
            warn!("Failed to write mask for '{}' to {}: {}", region.id, path.display(), e);
        }
    }

    let stats = aggregate(data, &mask, options.range, options.mode)?;
    debug!("Region '{}': mean={} over {} cells", region.id, stats.value, stats.count);
    Ok(stats)
}

/// Rasterize and aggregate every region against the shared data grid.
///
/// Regions run in parallel; the output keeps the input order.
pub fn compute_zonal_means(
    data: &RasterGrid,
    regions: &[PolygonRegion],
    rasterizer: &dyn CoverageRasterizer,
    options: &BatchOptions,
) -> Vec<RegionOutcome> {
    info!("Processing {} regions", regions.len());

    let outcomes: Vec<RegionOutcome> = regions
        .par_iter()
        .map(|region| {
            let result = process_region(data, region, rasterizer, options);
            if let Err(e) = &result {
                warn!("Region '{}' failed: {}", region.id, e);
            }
            RegionOutcome {
                id: region.id.clone(),
                result,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let empty = outcomes
        .iter()
        .filter(|o| matches!(&o.result, Ok(stats) if stats.is_empty()))
        .count();
    info!(
        "Finished {} regions: {} failed, {} with no qualifying cells",
        outcomes.len(),
        failed,
        empty
    );

    outcomes
}

/// Successful outcomes as report rows, in processing order.
pub fn collect_results(outcomes: &[RegionOutcome]) -> Vec<AggregationResult> {
    outcomes
        .iter()
        .filter_map(|outcome| match &outcome.result {
            Ok(stats) => Some(AggregationResult {
                location: outcome.id.clone(),
                value: stats.value,
            }),
            Err(_) => None,
        })
        .collect()
}
