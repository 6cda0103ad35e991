//! Policy Mermaid
//!
//! Renders declarative authorization policy documents as Mermaid
//! entity-relationship diagrams for documentation.
//!
//! # Overview
//!
//! A policy document describes resource types, unions of resource types,
//! actions, and the bindings that grant actions on types either directly
//! through a role or indirectly through a relationship. This library merges
//! one or more policy fragments, indexes the bindings, and renders a fixed
//! `erDiagram` grammar that downstream Mermaid renderers understand.
//!
//! ## Quick Start
//!
//! ```rust
//! use policy_mermaid::*;
//!
//! let fragment: PolicyDocument = serde_yaml::from_str(r#"
//! resource_types:
//!   - name: loadbalancer
//!     id_prefix: lb
//!     relationships:
//!       - relation: owner
//!         target_type_names: [tenant]
//! action_bindings:
//!   - type_name: loadbalancer
//!     action_name: get
//!     conditions:
//!       - role_binding: {}
//! "#)?;
//!
//! let document = PolicyMerger::new().merge(vec![fragment]);
//! let index = ActionIndex::build(&document.action_bindings);
//! let diagram = DiagramRenderer::new(&index)
//!     .render(&document.resource_types, &document.unions)?;
//!
//! assert_eq!(
//!     diagram,
//!     "erDiagram\n\tloadbalancer {\n\t\tid_prefix lb\n\t\taction get\n\t}\n\tloadbalancer }o--o{ tenant : owner"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Enumerations and run configuration
//! - [`policy`]: Policy document model, loading, merging, default policy
//! - [`diagram`]: Action indexes, rendering, output formatting
//! - [`pipeline`]: Orchestration, errors, logging, statistics
//!
//! ## Architecture
//!
//! ```text
//! fragments ──► FragmentLoader ──► PolicyMerger ──► PolicyDocument
//!                                                        │
//!                                                        ▼
//! output ◄── OutputFormatter ◄── DiagramRenderer ◄── ActionIndex
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod diagram;
pub mod pipeline;
pub mod policy;
pub mod types;

// Configuration and enums
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, DiagramConfig, FragmentFormat, OutputFormat,
};

// Policy model and merging
pub use policy::{
    default_policy_document, Action, ActionBinding, Condition, FragmentLoader, PolicyDocument,
    PolicyMerger, Relationship, RelationshipActionCondition, ResourceType, RoleBindingCondition,
    Union,
};

// Diagram generation
pub use diagram::{
    ActionIndex, DiagramRenderer, DirectActionIndex, OutputFormatter, RelationActionIndex,
    RelationActions,
};

// Pipeline control
pub use pipeline::{
    DiagramPipeline, LoggingConfig, PipelineError, PipelineResult, PipelineStatistics,
};
