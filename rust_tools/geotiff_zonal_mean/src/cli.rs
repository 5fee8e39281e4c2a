use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zonal-mean")]
#[command(about = "Average a global raster layer over each polygon of a vector file")]
#[command(version)]
pub struct Args {
    /// Input GeoTIFF path (single-band data raster)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Region polygons (GeoJSON or any OGR-readable vector file)
    #[arg(short, long, value_name = "FILE", required_unless_present = "inspect")]
    pub regions: Option<PathBuf>,

    /// Output CSV report path
    #[arg(short, long, value_name = "FILE", required_unless_present = "inspect")]
    pub output: Option<PathBuf>,

    /// Attribute holding the region identifier
    #[arg(long, value_name = "NAME", default_value = "id")]
    pub id_field: String,

    /// Ignore cells below this value (inclusive bound)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Ignore cells above this value (inclusive bound)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Override nodata value (default: read from input)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub nodata: Option<f64>,

    /// Burn every pixel touched by a region boundary, not only pixel centres
    #[arg(long)]
    pub all_touched: bool,

    /// Burn masks on the input raster's geotransform instead of the full-world grid
    #[arg(long)]
    pub data_extent: bool,

    /// Fail a region when data and mask grids do not line up instead of clipping
    #[arg(long)]
    pub strict: bool,

    /// Decimal places in the report (default: shortest representation)
    #[arg(long, value_name = "N")]
    pub precision: Option<usize>,

    /// Write each region mask as <id>.tif into this directory
    #[arg(long, value_name = "DIR")]
    pub mask_dir: Option<PathBuf>,

    /// Number of threads (default: all available)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Print raster metadata and value range, then exit
    #[arg(long)]
    pub inspect: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
