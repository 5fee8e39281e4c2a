use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use geotiff_zonal_mean::cli::Args;
use geotiff_zonal_mean::config::ZonalConfig;
use geotiff_zonal_mean::error::Result;
use geotiff_zonal_mean::{batch, crs, io, report, vector};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("=== GeoTIFF Zonal Mean ===");

    let mut config = ZonalConfig::from_args(args)?;

    // Set thread pool size if specified
    if let Some(n_threads) = config.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()
        {
            warn!("Failed to configure thread pool, using default: {}", e);
        } else {
            info!("Using {} threads", n_threads);
        }
    } else {
        info!("Using all available threads");
    }

    if config.inspect {
        let summary = io::summarize_raster(&config.input, config.nodata_override)?;
        let meta = &summary.metadata;
        println!("Size: {}x{}", meta.width, meta.height);
        println!("GeoTransform: {:?}", meta.geotransform);
        println!("NoData: {:?}", meta.nodata);
        for entry in &summary.band_metadata {
            println!("Metadata: {}", entry);
        }
        match (summary.min, summary.max) {
            (Some(min), Some(max)) => println!("{} <= x <= {}", min, max),
            _ => println!("No valid cells"),
        }
        println!("Valid cells: {}", summary.valid_cells);
        return Ok(());
    }

    let (mut data, metadata) = io::read_raster(&config.input)?;
    info!("Raster size: {}x{}", metadata.width, metadata.height);
    crs::check_geographic(&metadata.projection);

    if let Some(nd) = config.nodata_override {
        data.nodata = Some(nd);
    }
    match data.nodata {
        Some(nd) => info!("Using nodata value: {}", nd),
        None => info!("No nodata value specified"),
    }

    if let Some(dir) = &config.batch.mask_dir {
        std::fs::create_dir_all(dir)?;
        config.batch.projection = Some(metadata.projection.clone());
    }

    // Both are required by the argument parser unless --inspect is given
    let (Some(regions_path), Some(output_path)) = (config.regions.as_ref(), config.output.as_ref()) else {
        return Ok(());
    };

    let layer = vector::read_regions(regions_path, &config.id_field)?;
    info!(
        "Using {} of {} features ({} skipped)",
        layer.regions.len(),
        layer.feature_count,
        layer.skipped
    );

    let outcomes = batch::compute_zonal_means(&data, &layer.regions, &config.rasterizer, &config.batch);
    let results = batch::collect_results(&outcomes);

    report::write_report_file(output_path, &results, config.precision)?;

    info!("=== Done! ===");
    Ok(())
}
