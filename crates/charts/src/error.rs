use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to prepare output directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render chart {path}: {message}")]
    Render { path: PathBuf, message: String },
}
