use thiserror::Error;

/// Top-level error type for CSG to geometry conversion.
#[derive(Debug, Error)]
pub enum CsgGeometriesError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while parsing colors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color format {0:?}: expected 3 or 6 hex digits with optional leading '#'")]
    InvalidColorFormat(String),
}

/// Errors raised while validating tessellation options.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("normal threshold must be finite and non-negative, got {0}")]
    InvalidNormalThreshold(f64),

    #[error("batch vertex limit must be between 1 and u32::MAX, got {0}")]
    InvalidBatchLimit(usize),
}

/// Errors related to building input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`CsgGeometriesError`].
pub type Result<T> = std::result::Result<T, CsgGeometriesError>;
