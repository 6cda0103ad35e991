//! Policy document model
//!
//! This module contains the in-memory representation of a policy document:
//! resource types, unions, actions, and the action bindings that tie actions
//! to types through conditions.

use serde::{Deserialize, Deserializer, Serialize};

/// A complete policy document, or one fragment of one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Concrete resource types, in declaration order
    #[serde(default, alias = "resourceTypes")]
    pub resource_types: Vec<ResourceType>,

    /// Alias types standing for the sum of their members
    #[serde(default)]
    pub unions: Vec<Union>,

    /// Declared action names
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Associations of actions with types, qualified by conditions
    #[serde(default, alias = "actionBindings")]
    pub action_bindings: Vec<ActionBinding>,
}

impl PolicyDocument {
    /// Create a new empty policy document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every sequence of `other` onto this document, preserving order
    pub fn extend(&mut self, other: PolicyDocument) {
        self.resource_types.extend(other.resource_types);
        self.unions.extend(other.unions);
        self.actions.extend(other.actions);
        self.action_bindings.extend(other.action_bindings);
    }

    /// Check whether all four sequences are empty
    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
            && self.unions.is_empty()
            && self.actions.is_empty()
            && self.action_bindings.is_empty()
    }
}

/// A concrete resource type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Type name, used as the diagram entity name
    #[serde(default)]
    pub name: String,

    /// Prefix of identifiers minted for this type
    #[serde(default, alias = "idPrefix")]
    pub id_prefix: String,

    /// Relations this type declares to other types
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl ResourceType {
    /// Create a resource type without relationships
    pub fn new(name: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_prefix: id_prefix.into(),
            relationships: Vec::new(),
        }
    }

    /// Add a relationship to this resource type
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// A named relation from a resource type to one or more target types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relation name, used as the edge label
    #[serde(default)]
    pub relation: String,

    /// Names of the types this relation may point to
    #[serde(default, alias = "targetTypeNames")]
    pub target_type_names: Vec<String>,
}

impl Relationship {
    /// Create a relationship
    pub fn new<I, S>(relation: impl Into<String>, target_type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            relation: relation.into(),
            target_type_names: target_type_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named alias for the sum of several resource types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Union {
    /// Union name
    #[serde(default)]
    pub name: String,

    /// Member type names, in declaration order
    #[serde(default, alias = "resourceTypeNames")]
    pub resource_type_names: Vec<String>,
}

impl Union {
    /// Create a union
    pub fn new<I, S>(name: impl Into<String>, resource_type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            resource_type_names: resource_type_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A declared action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action name
    #[serde(default)]
    pub name: String,
}

impl Action {
    /// Create an action
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Binds an action to a type under a list of conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBinding {
    /// Type (resource type or union) the action is bound on
    #[serde(default, alias = "typeName")]
    pub type_name: String,

    /// Bound action name
    #[serde(default, alias = "actionName")]
    pub action_name: String,

    /// Conditions under which the action is permitted
    #[serde(default, deserialize_with = "deserialize_conditions")]
    pub conditions: Vec<Condition>,
}

impl ActionBinding {
    /// Create a binding with the given conditions
    pub fn new(
        type_name: impl Into<String>,
        action_name: impl Into<String>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            action_name: action_name.into(),
            conditions,
        }
    }
}

/// Marker payload of a role binding condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBindingCondition {}

/// Payload of a relationship action condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipActionCondition {
    /// Relation to follow from the bound type
    #[serde(default)]
    pub relation: String,

    /// Action that must be permitted on the related resource
    #[serde(default, alias = "actionName")]
    pub action_name: String,
}

/// One condition of an action binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ConditionEntry")]
pub enum Condition {
    /// The action is directly assignable through a role
    RoleBinding(RoleBindingCondition),
    /// The action is reachable through a related resource's permitted action
    RelationshipAction(RelationshipActionCondition),
    /// A condition entry matching neither recognized shape
    Unrecognized,
}

impl Condition {
    /// Create a role binding condition
    pub fn role_binding() -> Self {
        Condition::RoleBinding(RoleBindingCondition::default())
    }

    /// Create a relationship action condition
    pub fn relationship_action(relation: impl Into<String>, action_name: impl Into<String>) -> Self {
        Condition::RelationshipAction(RelationshipActionCondition {
            relation: relation.into(),
            action_name: action_name.into(),
        })
    }
}

/// Serialized shape of a condition: a map with optional keys for each kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConditionEntry {
    #[serde(default, alias = "roleBinding", skip_serializing_if = "Option::is_none")]
    role_binding: Option<RoleBindingCondition>,

    #[serde(
        default,
        alias = "relationshipAction",
        skip_serializing_if = "Option::is_none"
    )]
    relationship_action: Option<RelationshipActionCondition>,
}

impl ConditionEntry {
    /// Expand an entry into conditions, role binding first
    fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::with_capacity(2);
        if let Some(role_binding) = self.role_binding {
            conditions.push(Condition::RoleBinding(role_binding));
        }
        if let Some(relationship_action) = self.relationship_action {
            conditions.push(Condition::RelationshipAction(relationship_action));
        }
        if conditions.is_empty() {
            conditions.push(Condition::Unrecognized);
        }
        conditions
    }
}

impl From<Condition> for ConditionEntry {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::RoleBinding(role_binding) => Self {
                role_binding: Some(role_binding),
                relationship_action: None,
            },
            Condition::RelationshipAction(relationship_action) => Self {
                role_binding: None,
                relationship_action: Some(relationship_action),
            },
            Condition::Unrecognized => Self::default(),
        }
    }
}

fn deserialize_conditions<'de, D>(deserializer: D) -> Result<Vec<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<ConditionEntry>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .flat_map(ConditionEntry::into_conditions)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserialization_snake_case() {
        let yaml = r#"
resource_types:
  - name: loadbalancer
    id_prefix: loadbal
    relationships:
      - relation: owner
        target_type_names: [tenant]
unions:
  - name: resourceowner
    resource_type_names: [tenant]
actions:
  - name: loadbalancer_get
action_bindings:
  - type_name: loadbalancer
    action_name: loadbalancer_get
    conditions:
      - role_binding: {}
      - relationship_action:
          relation: owner
          action_name: loadbalancer_get
"#;
        let document: PolicyDocument = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(document.resource_types.len(), 1);
        assert_eq!(document.resource_types[0].id_prefix, "loadbal");
        assert_eq!(
            document.resource_types[0].relationships[0],
            Relationship::new("owner", ["tenant"])
        );
        assert_eq!(document.unions[0], Union::new("resourceowner", ["tenant"]));
        assert_eq!(document.actions[0].name, "loadbalancer_get");
        assert_eq!(
            document.action_bindings[0].conditions,
            vec![
                Condition::role_binding(),
                Condition::relationship_action("owner", "loadbalancer_get"),
            ]
        );
    }

    #[test]
    fn test_document_deserialization_camel_case_aliases() {
        let yaml = r#"
resourceTypes:
  - name: tenant
    idPrefix: tnntten
    relationships:
      - relation: parent
        targetTypeNames: [tenant]
unions:
  - name: resourceowner
    resourceTypeNames: [tenant]
actionBindings:
  - typeName: tenant
    actionName: loadbalancer_create
    conditions:
      - roleBinding: {}
      - relationshipAction:
          relation: parent
          actionName: loadbalancer_create
"#;
        let document: PolicyDocument = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(document.resource_types[0].id_prefix, "tnntten");
        assert_eq!(document.unions[0].resource_type_names, vec!["tenant"]);
        assert_eq!(document.action_bindings[0].type_name, "tenant");
        assert_eq!(document.action_bindings[0].conditions.len(), 2);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let document: PolicyDocument = serde_yaml::from_str("unions: []").unwrap();
        assert!(document.is_empty());

        let binding: ActionBinding =
            serde_yaml::from_str("type_name: tenant\naction_name: get").unwrap();
        assert!(binding.conditions.is_empty());
    }

    #[test]
    fn test_condition_with_neither_shape_is_unrecognized() {
        let yaml = r#"
type_name: tenant
action_name: get
conditions:
  - {}
  - role_binding: null
  - something_else:
      key: value
"#;
        let binding: ActionBinding = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            binding.conditions,
            vec![
                Condition::Unrecognized,
                Condition::Unrecognized,
                Condition::Unrecognized
            ]
        );
    }

    #[test]
    fn test_condition_entry_with_both_shapes_expands_in_order() {
        let yaml = r#"
type_name: loadbalancer
action_name: update
conditions:
  - role_binding: {}
    relationship_action:
      relation: owner
      action_name: update
"#;
        let binding: ActionBinding = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            binding.conditions,
            vec![
                Condition::role_binding(),
                Condition::relationship_action("owner", "update"),
            ]
        );
    }

    #[test]
    fn test_document_serializes_conditions_as_entries() {
        let document = PolicyDocument {
            action_bindings: vec![ActionBinding::new(
                "loadbalancer",
                "get",
                vec![
                    Condition::role_binding(),
                    Condition::relationship_action("owner", "get"),
                ],
            )],
            ..Default::default()
        };

        let yaml = serde_yaml::to_string(&document).unwrap();
        assert!(yaml.contains("role_binding: {}"));
        assert!(yaml.contains("relationship_action:"));
        assert!(yaml.contains("relation: owner"));

        let decoded: PolicyDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut document = PolicyDocument {
            resource_types: vec![ResourceType::new("tenant", "tnntten")],
            ..Default::default()
        };
        document.extend(PolicyDocument {
            resource_types: vec![ResourceType::new("loadbalancer", "loadbal")],
            actions: vec![Action::new("loadbalancer_get")],
            ..Default::default()
        });

        let names: Vec<&str> = document.resource_types.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["tenant", "loadbalancer"]);
        assert_eq!(document.actions.len(), 1);
    }
}
