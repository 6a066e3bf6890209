//! Error type shared by the I/O facing parts of the crate (config, sessions, export).

use std::path::PathBuf;

/// Errors raised while loading configuration, persisting sessions or exporting figures.
///
/// The visualizer operations themselves (`commit`, `preview`, `redraw`) never fail on
/// numeric input; the only core error is toggling a parameter that holds a scalar.
#[derive(Debug, thiserror::Error)]
pub enum SlidePlotError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("invalid color {0:?} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("parameter {name:?} is a {actual}, not a {expected}")]
    ParamKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("unknown demo {0:?} (expected \"bias\" or \"guess\")")]
    UnknownDemo(String),

    #[error("session was saved by the {found:?} demo, not {expected:?}")]
    SessionMismatch { expected: String, found: String },
}

impl SlidePlotError {
    /// Wrap an `std::io::Error` together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlidePlotError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlidePlotError>;
