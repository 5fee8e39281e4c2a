use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZonalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("Invalid target grid shape: {0}x{1} (both dimensions must be positive)")]
    InvalidShape(usize, usize),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Data grid {data_cols}x{data_rows} does not match mask grid {mask_cols}x{mask_rows}")]
    ShapeMismatch {
        data_cols: usize,
        data_rows: usize,
        mask_cols: usize,
        mask_rows: usize,
    },

    #[error("Data grid and mask grid extents are not aligned: {0}")]
    ExtentMismatch(String),

    #[error("Input raster has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    #[error("Pixel size must be nonzero: {0}")]
    InvalidPixelSize(f64),

    #[error("Invalid value bound: {0}")]
    InvalidRange(f64),

    #[error("Field '{0}' not found in vector layer")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, ZonalError>;
