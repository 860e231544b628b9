use std::path::PathBuf;

/// Failures while building ring or boundary geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("degenerate polygon: need >=3 vertices, got {count}")]
    DegeneratePolygon { count: usize },
    #[error("invalid ring radius: outer {outer}, inner {inner}")]
    InvalidRadius { outer: f64, inner: f64 },
}

/// Failures while loading or validating configuration and palette files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("palette group '{group}' entry {index}: invalid color {value:?}")]
    InvalidColor {
        group: String,
        index: usize,
        value: String,
    },
    #[error("palette is missing group '{group}' (need at least {needed} colors)")]
    MissingGroup { group: String, needed: usize },
    #[error("palette has no ring color groups besides black and white")]
    NoRingColors,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
