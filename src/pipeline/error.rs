//! Error types and handling
//!
//! This module contains the error types raised while turning policy fragments
//! into a diagram. Every error is fatal for the run: nothing is retried and no
//! partial diagram is produced.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Decoding failure for a single fragment, by serialization format
#[derive(Debug, Error)]
pub enum DecodeError {
    /// YAML decoding error
    #[error("invalid YAML")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding error
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while producing a diagram
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A fragment path is missing or unreadable
    #[error("failed to open policy document file {}", path.display())]
    FragmentOpen {
        /// Path of the fragment
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A fragment's content does not match the policy document format
    #[error("failed to decode policy document file {}", path.display())]
    FragmentDecode {
        /// Path of the fragment
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: DecodeError,
    },

    /// Producing the diagram text failed
    #[error("failed to render mermaid chart for policy")]
    Render(#[from] fmt::Error),

    /// Writing the formatted diagram failed
    #[error("failed to write diagram output")]
    Output(#[from] io::Error),

    /// Run configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    /// Create a fragment open error
    pub fn fragment_open(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FragmentOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a fragment decode error
    pub fn fragment_decode(path: impl AsRef<Path>, source: impl Into<DecodeError>) -> Self {
        Self::FragmentDecode {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Path of the fragment involved, if any
    pub fn fragment_path(&self) -> Option<&Path> {
        match self {
            PipelineError::FragmentOpen { path, .. } | PipelineError::FragmentDecode { path, .. } => {
                Some(path)
            }
            PipelineError::Render(_)
            | PipelineError::Output(_)
            | PipelineError::Configuration(_) => None,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            PipelineError::FragmentOpen { .. } => "Fragment Open",
            PipelineError::FragmentDecode { .. } => "Fragment Decode",
            PipelineError::Render(_) => "Render",
            PipelineError::Output(_) => "Output",
            PipelineError::Configuration(_) => "Configuration",
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_open_error() {
        let error = PipelineError::fragment_open(
            "missing.yaml",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );

        assert_eq!(error.category(), "Fragment Open");
        assert_eq!(error.fragment_path(), Some(Path::new("missing.yaml")));
        assert_eq!(error.to_string(), "failed to open policy document file missing.yaml");
        assert_eq!(
            format!("{:#}", anyhow::Error::new(error)),
            "failed to open policy document file missing.yaml: no such file"
        );
    }

    #[test]
    fn test_fragment_decode_error() {
        let source = serde_yaml::from_str::<Vec<String>>("key: value").unwrap_err();
        let error = PipelineError::fragment_decode("policy.yaml", source);

        assert_eq!(error.category(), "Fragment Decode");
        assert!(matches!(
            error,
            PipelineError::FragmentDecode { source: DecodeError::Yaml(_), .. }
        ));
        assert_eq!(error.to_string(), "failed to decode policy document file policy.yaml");
    }

    #[test]
    fn test_decode_error_chain_names_each_cause_once() {
        let source = serde_yaml::from_str::<Vec<String>>("key: value").unwrap_err();
        let cause = source.to_string();
        let error = PipelineError::fragment_decode("policy.yaml", source);

        let report = format!("{:#}", anyhow::Error::new(error));
        assert_eq!(
            report,
            format!("failed to decode policy document file policy.yaml: invalid YAML: {}", cause)
        );
        assert_eq!(report.matches(&cause).count(), 1);
    }

    #[test]
    fn test_error_from_fmt_and_io() {
        let error: PipelineError = fmt::Error.into();
        assert_eq!(error.category(), "Render");
        assert!(error.fragment_path().is_none());

        let error: PipelineError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(error.category(), "Output");
    }

    #[test]
    fn test_configuration_error() {
        let error = PipelineError::configuration_error("bad output path");
        assert_eq!(error.category(), "Configuration");
        assert_eq!(error.to_string(), "Configuration error: bad output path");
    }

    #[test]
    fn test_pipeline_result_type() {
        fn succeed() -> PipelineResult<usize> {
            Ok(3)
        }
        fn fail() -> PipelineResult<usize> {
            Err(PipelineError::configuration_error("nope"))
        }

        assert_eq!(succeed().unwrap(), 3);
        assert!(fail().is_err());
    }
}
