use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for feature-map operations.
pub type Result<T> = std::result::Result<T, FmapError>;

/// Error variants for reference analysis and feature-map construction.
///
/// Per-file problems (unreadable sources, parse failures) are handled by
/// skipping the file, so the only variants that surface from a pipeline run
/// come from analyzer initialization.
#[derive(Debug, Error)]
pub enum FmapError {
    /// The TypeScript compiler configuration could not be loaded.
    ///
    /// This is the one terminal condition: without module-resolution context
    /// the analyzer cannot initialize.
    #[error("failed to load compiler configuration '{path}': {message}")]
    CompilerConfig {
        /// Path to the tsconfig file.
        path: PathBuf,
        /// Reason the configuration was rejected.
        message: String,
    },
}
