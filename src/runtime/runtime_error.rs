use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, linking or running a compiled module.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The prebuilt numeric library could not be loaded
    #[error("unable to load stdlib from {path}: {message}")]
    Stdlib { path: PathBuf, message: String },

    /// The binary is not a valid module
    #[error("invalid module: {0}")]
    Compile(String),

    /// An import could not be resolved
    #[error("unable to link module: {0}")]
    Link(String),

    #[error("module has no \"{0}\" function with the expected signature")]
    MissingExport(&'static str),

    /// Execution trapped, e.g. on division by zero
    #[error("runtime error: {0}")]
    Trap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RuntimeError::MissingExport("compute");
        assert_eq!(
            err.to_string(),
            "module has no \"compute\" function with the expected signature"
        );

        let err = RuntimeError::Stdlib {
            path: PathBuf::from("wasm/relib.wasm"),
            message: "No such file".to_string(),
        };
        assert!(err.to_string().contains("wasm/relib.wasm"));
    }
}
