//! Built-in default policy document
//!
//! Used whenever a run is started without any policy fragments.

use super::document::{
    Action, ActionBinding, Condition, PolicyDocument, Relationship, ResourceType, Union,
};
use std::sync::OnceLock;

/// Actions the default document grants on load balancers
const LOADBALANCER_ACTIONS: [&str; 5] = [
    "loadbalancer_create",
    "loadbalancer_get",
    "loadbalancer_list",
    "loadbalancer_update",
    "loadbalancer_delete",
];

/// Actions bound on the owner of a load balancer rather than on the load balancer itself
const OWNER_SCOPED_ACTIONS: [&str; 2] = ["loadbalancer_create", "loadbalancer_list"];

/// Returns the built-in default policy document.
///
/// The document is built on first use and shared immutably afterwards.
pub fn default_policy_document() -> &'static PolicyDocument {
    static DOCUMENT: OnceLock<PolicyDocument> = OnceLock::new();
    DOCUMENT.get_or_init(build_default_policy_document)
}

fn build_default_policy_document() -> PolicyDocument {
    let resource_types = vec![
        ResourceType::new("role", "permrol")
            .with_relationship(Relationship::new("subject", ["subject"])),
        ResourceType::new("user", "idntusr"),
        ResourceType::new("client", "idntclt"),
        ResourceType::new("tenant", "tnntten")
            .with_relationship(Relationship::new("parent", ["tenant"])),
        ResourceType::new("loadbalancer", "loadbal")
            .with_relationship(Relationship::new("owner", ["resourceowner"])),
    ];

    let unions = vec![
        Union::new("subject", ["user", "client"]),
        Union::new("resourceowner", ["tenant"]),
    ];

    let actions = LOADBALANCER_ACTIONS.iter().copied().map(Action::new).collect();

    let mut action_bindings = Vec::new();
    for action in LOADBALANCER_ACTIONS {
        if OWNER_SCOPED_ACTIONS.contains(&action) {
            action_bindings.push(ActionBinding::new(
                "resourceowner",
                action,
                vec![
                    Condition::role_binding(),
                    Condition::relationship_action("parent", action),
                ],
            ));
        } else {
            action_bindings.push(ActionBinding::new(
                "loadbalancer",
                action,
                vec![
                    Condition::role_binding(),
                    Condition::relationship_action("owner", action),
                ],
            ));
        }
    }

    PolicyDocument {
        resource_types,
        unions,
        actions,
        action_bindings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_shared() {
        let first = default_policy_document();
        let second = default_policy_document();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_default_document_contents() {
        let document = default_policy_document();

        let names: Vec<&str> = document.resource_types.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["role", "user", "client", "tenant", "loadbalancer"]);
        assert_eq!(document.unions.len(), 2);
        assert_eq!(document.actions.len(), LOADBALANCER_ACTIONS.len());
        assert_eq!(document.action_bindings.len(), LOADBALANCER_ACTIONS.len());
    }

    #[test]
    fn test_default_bindings_grant_through_role_and_relation() {
        let document = default_policy_document();

        for binding in &document.action_bindings {
            assert_eq!(binding.conditions[0], Condition::role_binding());
            match &binding.conditions[1] {
                Condition::RelationshipAction(condition) => {
                    assert_eq!(condition.action_name, binding.action_name);
                }
                other => panic!("Expected relationship action, got {:?}", other),
            }
        }
    }
}
