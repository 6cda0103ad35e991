//! Pipeline orchestration and control
//!
//! This module drives a complete run and owns the ambient concerns around it:
//! error types, logging setup, and run statistics.
//!
//! # Overview
//!
//! - **DiagramPipeline**: load -> merge -> index -> render -> format
//! - **PipelineError**: fatal error taxonomy of a run
//! - **LoggingConfig**: tracing subscriber setup
//! - **PipelineStatistics**: counts for logs and the dry-run summary
//!
//! # Usage Example
//!
//! ```rust
//! use policy_mermaid::pipeline::*;
//! use policy_mermaid::types::DiagramConfig;
//!
//! // No fragments: the built-in default policy is rendered
//! let pipeline = DiagramPipeline::new(DiagramConfig::default())?;
//! let output = pipeline.run()?;
//! assert!(output.starts_with("erDiagram\n"));
//! # Ok::<(), PipelineError>(())
//! ```

pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod statistics;

// Re-export all public types for convenience
pub use error::{DecodeError, PipelineError, PipelineResult};
pub use logging::{LoggingConfig, LoggingError};
pub use orchestrator::{DiagramPipeline, PreparedPolicy};
pub use statistics::PipelineStatistics;
