use std::path::PathBuf;

use thiserror::Error;

use neuroatlas_core::{CoreError, Plane};

/// Errors originating from the data providers.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{} slice positions are not monotonic", .plane.label())]
    UnsortedPlane { plane: Plane },

    #[error(transparent)]
    Core(#[from] CoreError),
}
