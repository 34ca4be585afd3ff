//! Error types for the engine binary.

use sortviz_core::config::ConfigError;
use sortviz_core::controller::ControllerError;

/// Errors that can occur during engine startup or the demo run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration failed to load or validate.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// A controller operation failed.
    #[error("controller error: {source}")]
    Controller {
        /// The underlying controller error.
        #[from]
        source: ControllerError,
    },

    /// The configured demo algorithm name is unknown.
    #[error("unknown algorithm: {name}")]
    UnknownAlgorithm {
        /// The rejected algorithm name.
        name: String,
    },
}
