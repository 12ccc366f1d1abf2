//! Unified recovery error type used across all compiler phases.

use thiserror::Error;

/// A job recovery failure. Every variant is a hard stop: once one of these
/// invariants fails there is no partial prefill worth handing to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    /// The pipeline payload is not an object, or lacks a `DEEPLOY_SPECS` block.
    #[error("malformed pipeline configuration: {0}")]
    MalformedPipeline(String),

    /// The on-chain job-type code has no mapping in the resource catalog.
    #[error("unsupported on-chain job type code {0}")]
    UnsupportedJobType(u8),

    /// A structurally required plugin class is absent after decoding.
    #[error("missing plugin configuration: {0}")]
    MissingPluginConfiguration(String),

    /// A service job's deployed image matches no known catalog service.
    #[error("no catalog service matches deployed image '{0}'")]
    UnknownServiceImage(String),
}

impl RecoveryError {
    /// Stable machine-readable code, surfaced to the host UI alongside
    /// the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            RecoveryError::MalformedPipeline(_) => "R001",
            RecoveryError::UnsupportedJobType(_) => "R002",
            RecoveryError::MissingPluginConfiguration(_) => "R003",
            RecoveryError::UnknownServiceImage(_) => "R004",
        }
    }
}
