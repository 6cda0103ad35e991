//! Diagram generation
//!
//! This module turns a merged policy document into Mermaid diagram text.
//!
//! # Overview
//!
//! - **ActionIndex**: direct and relation-scoped actions per type, derived
//!   from action bindings
//! - **DiagramRenderer**: the fixed `erDiagram` grammar
//! - **OutputFormatter**: raw text or a fenced markdown block
//!
//! # Usage Example
//!
//! ```rust
//! use policy_mermaid::diagram::*;
//! use policy_mermaid::policy::*;
//!
//! let document = PolicyDocument {
//!     resource_types: vec![ResourceType::new("loadbalancer", "lb")
//!         .with_relationship(Relationship::new("owner", ["tenant"]))],
//!     action_bindings: vec![ActionBinding::new(
//!         "loadbalancer",
//!         "get",
//!         vec![Condition::role_binding()],
//!     )],
//!     ..Default::default()
//! };
//!
//! let index = ActionIndex::build(&document.action_bindings);
//! let diagram = DiagramRenderer::new(&index)
//!     .render(&document.resource_types, &document.unions)?;
//!
//! assert!(diagram.contains("\t\taction get"));
//! assert!(diagram.contains("loadbalancer }o--o{ tenant : owner"));
//!
//! let output = OutputFormatter::embedded(true).format_diagram(&diagram);
//! assert!(output.starts_with("```mermaid"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod formatter;
pub mod index;
pub mod renderer;

// Re-export all public types for convenience
pub use formatter::OutputFormatter;
pub use index::{ActionIndex, DirectActionIndex, RelationActionIndex, RelationActions};
pub use renderer::DiagramRenderer;
