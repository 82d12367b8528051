use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depcollect operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepcollectError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed package manifest (e.g. package.json).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the package.json for syntax errors"))]
    Manifest { message: String },

    /// Invalid configuration file or option.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Copying a collected package into the destination tree failed.
    #[error("Failed to copy package '{name}': {message}")]
    #[diagnostic(help(
        "Every collected package must exist in the source tree; \
         check that dependencies are installed"
    ))]
    Copy { name: String, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DepcollectResult<T> = miette::Result<T>;
