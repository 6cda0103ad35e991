//! Merging of policy fragments
//!
//! This module contains the PolicyMerger, which concatenates any number of
//! decoded fragments into a single PolicyDocument.

use super::default::default_policy_document;
use super::document::PolicyDocument;
use tracing::{debug, info};

/// Combines decoded policy fragments into one document
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyMerger;

impl PolicyMerger {
    /// Create a new merger
    pub fn new() -> Self {
        Self
    }

    /// Merge fragments in the order they are supplied.
    ///
    /// Each of the four sequences is concatenated without deduplication. When
    /// no fragment is supplied the built-in default document is returned
    /// instead of an empty one.
    pub fn merge<I>(&self, fragments: I) -> PolicyDocument
    where
        I: IntoIterator<Item = PolicyDocument>,
    {
        let mut merged = PolicyDocument::new();
        let mut fragment_count = 0usize;

        for fragment in fragments {
            debug!(
                fragment = fragment_count,
                resource_types = fragment.resource_types.len(),
                unions = fragment.unions.len(),
                actions = fragment.actions.len(),
                action_bindings = fragment.action_bindings.len(),
                "Merging policy fragment"
            );
            merged.extend(fragment);
            fragment_count += 1;
        }

        if fragment_count == 0 {
            info!("No policy fragments supplied, using built-in default policy document");
            return default_policy_document().clone();
        }

        info!(
            "Merged {} policy fragments into {} resource types and {} unions",
            fragment_count,
            merged.resource_types.len(),
            merged.unions.len()
        );
        merged
    }
}
