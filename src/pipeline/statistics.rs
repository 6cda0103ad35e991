//! Pipeline statistics
//!
//! Counts gathered while loading, merging and indexing a policy, used for
//! log lines and the dry-run summary.

use crate::diagram::ActionIndex;
use crate::policy::PolicyDocument;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts describing one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatistics {
    /// Number of fragments loaded (0 when the default policy is used)
    pub fragment_count: usize,
    /// Whether the built-in default policy was used
    pub used_default_policy: bool,
    /// Resource types in the merged document
    pub resource_type_count: usize,
    /// Unions in the merged document
    pub union_count: usize,
    /// Declared actions in the merged document
    pub action_count: usize,
    /// Action bindings in the merged document
    pub action_binding_count: usize,
    /// Entries in the direct action index
    pub direct_action_count: usize,
    /// Entries in the relation action index
    pub related_action_count: usize,
}

impl PipelineStatistics {
    /// Gather statistics for a merged document and its index
    pub fn collect(fragment_count: usize, document: &PolicyDocument, index: &ActionIndex) -> Self {
        Self {
            fragment_count,
            used_default_policy: fragment_count == 0,
            resource_type_count: document.resource_types.len(),
            union_count: document.unions.len(),
            action_count: document.actions.len(),
            action_binding_count: document.action_bindings.len(),
            direct_action_count: index.direct.entry_count(),
            related_action_count: index.related.entry_count(),
        }
    }

    /// Number of entity blocks the diagram will contain
    pub fn entity_count(&self) -> usize {
        self.resource_type_count + self.union_count
    }

    /// Multi-line human readable summary
    pub fn summary(&self) -> String {
        let source = if self.used_default_policy {
            "built-in default policy".to_string()
        } else {
            format!("{} fragment(s)", self.fragment_count)
        };

        format!(
            "Source: {}\n\
             Resource types: {}\n\
             Unions: {}\n\
             Actions: {}\n\
             Action bindings: {}\n\
             Direct action entries: {}\n\
             Relation action entries: {}",
            source,
            self.resource_type_count,
            self.union_count,
            self.action_count,
            self.action_binding_count,
            self.direct_action_count,
            self.related_action_count
        )
    }
}

impl fmt::Display for PipelineStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entities, {} bindings, {} direct and {} relation action entries",
            self.entity_count(),
            self.action_binding_count,
            self.direct_action_count,
            self.related_action_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{ActionBinding, Condition, ResourceType, Union};

    #[test]
    fn test_collect_statistics() {
        let document = PolicyDocument {
            resource_types: vec![ResourceType::new("loadbalancer", "loadbal")],
            unions: vec![Union::new("resourceowner", ["tenant"])],
            actions: Vec::new(),
            action_bindings: vec![ActionBinding::new(
                "loadbalancer",
                "get",
                vec![
                    Condition::role_binding(),
                    Condition::relationship_action("owner", "get"),
                    Condition::relationship_action("owner", "get"),
                ],
            )],
        };
        let index = ActionIndex::build(&document.action_bindings);

        let stats = PipelineStatistics::collect(2, &document, &index);
        assert!(!stats.used_default_policy);
        assert_eq!(stats.entity_count(), 2);
        assert_eq!(stats.direct_action_count, 1);
        assert_eq!(stats.related_action_count, 2);
        assert!(stats.summary().contains("Source: 2 fragment(s)"));
        assert_eq!(
            stats.to_string(),
            "2 entities, 1 bindings, 1 direct and 2 relation action entries"
        );
    }

    #[test]
    fn test_default_policy_summary() {
        let stats = PipelineStatistics::collect(0, &PolicyDocument::new(), &ActionIndex::default());
        assert!(stats.used_default_policy);
        assert!(stats.summary().starts_with("Source: built-in default policy"));
    }
}
