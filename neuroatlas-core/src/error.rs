use thiserror::Error;

/// Errors originating from the core coordinate engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid slice geometry: {reason}")]
    InvalidSlice { reason: String },

    #[error("invalid screen size: {width}\u{d7}{height} (must be positive and finite)")]
    InvalidScreenSize { width: f64, height: f64 },

    #[error("invalid grid resolution: {0} (must be >= 1)")]
    InvalidResolution(u32),
}
