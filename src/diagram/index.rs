//! Action indexes derived from action bindings
//!
//! This module contains the DirectActionIndex and RelationActionIndex and the
//! ActionIndex that builds both from a policy document's action bindings in a
//! single pass. Indexes are read-only once built.

use crate::policy::{ActionBinding, Condition};
use std::collections::HashMap;
use tracing::debug;

/// Action names directly assignable through a role, per type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectActionIndex {
    actions: HashMap<String, Vec<String>>,
}

impl DirectActionIndex {
    /// Actions recorded for a type, in binding order. Empty when none.
    pub fn actions_for(&self, type_name: &str) -> &[String] {
        self.actions.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of type names with at least one entry
    pub fn type_count(&self) -> usize {
        self.actions.len()
    }

    /// Total number of entries across all types
    pub fn entry_count(&self) -> usize {
        self.actions.values().map(Vec::len).sum()
    }

    fn push(&mut self, type_name: &str, action_name: &str) {
        self.actions
            .entry(type_name.to_string())
            .or_default()
            .push(action_name.to_string());
    }
}

/// Relation name to action names, kept in first-insertion order of relations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationActions {
    relations: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl RelationActions {
    /// Actions recorded for a relation, in binding order
    pub fn get(&self, relation: &str) -> Option<&[String]> {
        self.positions
            .get(relation)
            .map(|&position| self.relations[position].1.as_slice())
    }

    /// Iterate relations in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.relations
            .iter()
            .map(|(relation, actions)| (relation.as_str(), actions.as_slice()))
    }

    /// Relation names in the order they were first seen
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().map(|(relation, _)| relation.as_str())
    }

    /// Number of distinct relations
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether no relation has been recorded
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    fn push(&mut self, relation: &str, action_name: &str) {
        let position = match self.positions.get(relation) {
            Some(&position) => position,
            None => {
                self.relations.push((relation.to_string(), Vec::new()));
                let position = self.relations.len() - 1;
                self.positions.insert(relation.to_string(), position);
                position
            }
        };
        self.relations[position].1.push(action_name.to_string());
    }
}

/// Actions reachable through a relation, per type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationActionIndex {
    by_type: HashMap<String, RelationActions>,
}

impl RelationActionIndex {
    /// Relation-scoped actions recorded for a type, if any
    pub fn relations_for(&self, type_name: &str) -> Option<&RelationActions> {
        self.by_type.get(type_name)
    }

    /// Actions recorded for a type and relation, in binding order. Empty when none.
    pub fn actions_for(&self, type_name: &str, relation: &str) -> &[String] {
        self.relations_for(type_name)
            .and_then(|relations| relations.get(relation))
            .unwrap_or(&[])
    }

    /// Number of type names with at least one entry
    pub fn type_count(&self) -> usize {
        self.by_type.len()
    }

    /// Total number of entries across all types and relations
    pub fn entry_count(&self) -> usize {
        self.by_type
            .values()
            .flat_map(|relations| relations.iter())
            .map(|(_, actions)| actions.len())
            .sum()
    }

    fn push(&mut self, type_name: &str, relation: &str, action_name: &str) {
        self.by_type
            .entry(type_name.to_string())
            .or_default()
            .push(relation, action_name);
    }
}

/// Both action indexes for one policy document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionIndex {
    /// Actions granted through role bindings
    pub direct: DirectActionIndex,
    /// Actions granted through relationships
    pub related: RelationActionIndex,
}

impl ActionIndex {
    /// Build both indexes from bindings, in document order.
    ///
    /// Every role binding condition contributes the binding's action to the
    /// direct index, and every relationship action condition contributes its
    /// own action under its relation. Nothing is sorted or deduplicated;
    /// unrecognized conditions contribute nothing.
    pub fn build(bindings: &[ActionBinding]) -> Self {
        let mut index = Self::default();
        let mut unrecognized = 0usize;

        for binding in bindings {
            for condition in &binding.conditions {
                match condition {
                    Condition::RoleBinding(_) => {
                        index.direct.push(&binding.type_name, &binding.action_name);
                    }
                    Condition::RelationshipAction(relationship_action) => {
                        index.related.push(
                            &binding.type_name,
                            &relationship_action.relation,
                            &relationship_action.action_name,
                        );
                    }
                    Condition::Unrecognized => unrecognized += 1,
                }
            }
        }

        debug!(
            bindings = bindings.len(),
            direct_entries = index.direct.entry_count(),
            related_entries = index.related.entry_count(),
            unrecognized_conditions = unrecognized,
            "Built action indexes"
        );
        index
    }
}
