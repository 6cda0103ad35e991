//! Policy documents
//!
//! This module holds the policy document model and everything needed to get
//! one into memory: decoding fragments from disk, merging them, and the
//! built-in default used when no fragment is given.
//!
//! # Overview
//!
//! - **PolicyDocument**: resource types, unions, actions, action bindings
//! - **Condition**: role binding, relationship action, or unrecognized
//! - **FragmentLoader**: opens and decodes YAML or JSON fragments
//! - **PolicyMerger**: concatenates fragments in order
//!
//! # Usage Example
//!
//! ```rust
//! use policy_mermaid::policy::*;
//!
//! let fragment: PolicyDocument = serde_yaml::from_str(
//!     "resource_types:\n  - name: tenant\n    id_prefix: tnntten\n",
//! )?;
//!
//! let merged = PolicyMerger::new().merge(vec![fragment]);
//! assert_eq!(merged.resource_types[0].id_prefix, "tnntten");
//!
//! // Without fragments the built-in default is used
//! let fallback = PolicyMerger::new().merge(Vec::new());
//! assert_eq!(&fallback, default_policy_document());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod default;
pub mod document;
pub mod loader;
pub mod merger;

// Re-export all public types for convenience
pub use default::default_policy_document;
pub use document::*;
pub use loader::FragmentLoader;
pub use merger::PolicyMerger;
