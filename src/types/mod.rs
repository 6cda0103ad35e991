//! Core types and configuration for the policy diagram tool
//!
//! This module contains the enumerations and configuration structures used
//! throughout the pipeline.
//!
//! # Overview
//!
//! - **Enums**: fragment serialization format and output wrapping mode
//! - **Configuration**: CLI arguments, configuration file, and validation
//!
//! # Usage Example
//!
//! ```rust
//! use policy_mermaid::types::*;
//!
//! let config = DiagramConfig {
//!     files: vec!["policy.yaml".into()],
//!     output_format: OutputFormat::Markdown,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(FragmentFormat::from_path("policy.yaml"), FragmentFormat::Yaml);
//! ```

pub mod config;
pub mod enums;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
