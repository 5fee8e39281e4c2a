use crate::batch::{BatchOptions, MaskExtent};
use crate::cli::Args;
use crate::error::{Result, ZonalError};
use crate::rasterize::GdalRasterizer;
use crate::zonal::{MismatchMode, ValueRange};
use log::warn;
use std::path::PathBuf;

/// Validated run settings derived from the command line.
#[derive(Debug, Clone)]
pub struct ZonalConfig {
    pub input: PathBuf,
    pub regions: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub id_field: String,
    pub nodata_override: Option<f64>,
    pub rasterizer: GdalRasterizer,
    pub precision: Option<usize>,
    pub threads: Option<usize>,
    pub inspect: bool,
    pub batch: BatchOptions,
}

fn check_bound(value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(ZonalError::InvalidRange(v)),
        other => Ok(other),
    }
}

impl ZonalConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let min = check_bound(args.min)?;
        let max = check_bound(args.max)?;
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                warn!("--min {} is above --max {}; every region will be empty", lo, hi);
            }
        }

        let rasterizer = GdalRasterizer {
            all_touched: args.all_touched,
        };

        let batch = BatchOptions {
            range: ValueRange::new(min, max),
            mode: if args.strict {
                MismatchMode::Strict
            } else {
                MismatchMode::Clip
            },
            mask_extent: if args.data_extent {
                MaskExtent::DataGrid
            } else {
                MaskExtent::World
            },
            mask_dir: args.mask_dir,
            projection: None,
        };

        Ok(Self {
            input: args.input,
            regions: args.regions,
            output: args.output,
            id_field: args.id_field,
            nodata_override: args.nodata,
            rasterizer,
            precision: args.precision,
            threads: args.threads,
            inspect: args.inspect,
            batch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Result<ZonalConfig> {
        let mut full = vec!["zonal-mean"];
        full.extend_from_slice(argv);
        ZonalConfig::from_args(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["-i", "crop.tif", "-r", "countries.geo.json", "-o", "out.csv"]).unwrap();
        assert_eq!(config.id_field, "id");
        assert_eq!(config.batch.range, ValueRange::default());
        assert_eq!(config.batch.mode, MismatchMode::Clip);
        assert_eq!(config.batch.mask_extent, MaskExtent::World);
        assert!(!config.rasterizer.all_touched);
    }

    #[test]
    fn test_bounds_and_flags() {
        let config = parse(&[
            "-i", "crop.tif", "-r", "c.json", "-o", "o.csv", "--min", "-5", "--max", "100", "--strict",
            "--all-touched", "--data-extent",
        ])
        .unwrap();
        assert_eq!(config.batch.range, ValueRange::new(Some(-5.0), Some(100.0)));
        assert_eq!(config.batch.mode, MismatchMode::Strict);
        assert_eq!(config.batch.mask_extent, MaskExtent::DataGrid);
        assert!(config.rasterizer.all_touched);
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let err = parse(&["-i", "a.tif", "-r", "b.json", "-o", "c.csv", "--min", "NaN"]).unwrap_err();
        assert!(matches!(err, ZonalError::InvalidRange(_)));
    }

    #[test]
    fn test_inverted_bounds_accepted() {
        let config = parse(&["-i", "a.tif", "-r", "b.json", "-o", "c.csv", "--min", "10", "--max", "1"]).unwrap();
        assert_eq!(config.batch.range, ValueRange::new(Some(10.0), Some(1.0)));
    }

    #[test]
    fn test_inspect_needs_no_regions() {
        let config = parse(&["-i", "a.tif", "--inspect"]).unwrap();
        assert!(config.inspect);
        assert!(config.regions.is_none());
        assert!(Args::try_parse_from(["zonal-mean", "-i", "a.tif"]).is_err());
    }
}
