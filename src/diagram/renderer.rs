//! Mermaid entity-relationship rendering
//!
//! This module renders resource types, unions and the action indexes as a
//! Mermaid `erDiagram`. The grammar is fixed:
//!
//! ```text
//! erDiagram
//! 	EntityName {
//! 		id_prefix <prefix>
//! 		action <name>
//! 		<relation>_action <name>
//! 	}
//! 	EntityName }o--o{ TargetName : <relation>
//! 	UnionName {
//! 		action <name>
//! 	}
//! 	UnionName ||--|| MemberName : alias
//! ```
//!
//! Lines are joined with `\n` and the text carries no trailing newline.

use super::index::ActionIndex;
use crate::pipeline::error::PipelineResult;
use crate::policy::{ResourceType, Union};
use std::fmt::{self, Write};
use tracing::{debug, instrument};

/// Diagram header line
pub const DIAGRAM_HEADER: &str = "erDiagram";

/// Edge operator between a resource type and a relationship target
pub const RELATIONSHIP_EDGE: &str = "}o--o{";

/// Edge operator between a union and one of its members
pub const ALIAS_EDGE: &str = "||--||";

/// Label of union member edges
pub const ALIAS_LABEL: &str = "alias";

/// Renders policy entities using a prebuilt action index
#[derive(Debug, Clone, Copy)]
pub struct DiagramRenderer<'a> {
    index: &'a ActionIndex,
}

impl<'a> DiagramRenderer<'a> {
    /// Create a renderer over an action index
    pub fn new(index: &'a ActionIndex) -> Self {
        Self { index }
    }

    /// Render the complete diagram into a new string
    #[instrument(skip_all, fields(resource_types = resource_types.len(), unions = unions.len()))]
    pub fn render(&self, resource_types: &[ResourceType], unions: &[Union]) -> PipelineResult<String> {
        let mut out = String::new();
        self.render_to(&mut out, resource_types, unions)?;
        debug!(bytes = out.len(), "Rendered diagram");
        Ok(out)
    }

    /// Render the complete diagram into any `fmt::Write` sink
    pub fn render_to<W: Write>(
        &self,
        out: &mut W,
        resource_types: &[ResourceType],
        unions: &[Union],
    ) -> fmt::Result {
        out.write_str(DIAGRAM_HEADER)?;

        for resource_type in resource_types {
            write!(out, "\n\t{} {{", resource_type.name)?;
            write!(out, "\n\t\tid_prefix {}", resource_type.id_prefix)?;
            self.write_attributes(out, &resource_type.name)?;
            out.write_str("\n\t}")?;

            for relationship in &resource_type.relationships {
                for target in &relationship.target_type_names {
                    write!(
                        out,
                        "\n\t{} {} {} : {}",
                        resource_type.name, RELATIONSHIP_EDGE, target, relationship.relation
                    )?;
                }
            }
        }

        for union in unions {
            write!(out, "\n\t{} {{", union.name)?;
            self.write_attributes(out, &union.name)?;
            out.write_str("\n\t}")?;

            for member in &union.resource_type_names {
                write!(out, "\n\t{} {} {} : {}", union.name, ALIAS_EDGE, member, ALIAS_LABEL)?;
            }
        }

        Ok(())
    }

    /// Write the action lines of an entity block: direct actions first, then
    /// relation-scoped actions grouped by relation in first-seen order
    fn write_attributes<W: Write>(&self, out: &mut W, type_name: &str) -> fmt::Result {
        for action in self.index.direct.actions_for(type_name) {
            write!(out, "\n\t\taction {}", action)?;
        }

        if let Some(relations) = self.index.related.relations_for(type_name) {
            for (relation, actions) in relations.iter() {
                for action in actions {
                    write!(out, "\n\t\t{}_action {}", relation, action)?;
                }
            }
        }

        Ok(())
    }
}
