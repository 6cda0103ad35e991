// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use policy_mermaid::*;


#[test]
fn test_crate_root_exports() {
    let document = PolicyMerger::new().merge(Vec::new());
    assert_eq!(&document, default_policy_document());

    let index = ActionIndex::build(&document.action_bindings);
    let diagram = DiagramRenderer::new(&index)
        .render(&document.resource_types, &document.unions)
        .unwrap();

    let formatted = OutputFormatter::new(OutputFormat::Markdown).format_diagram(&diagram);
    assert!(formatted.starts_with("```mermaid\nerDiagram"));
}

#[test]
fn test_condition_shapes_from_yaml() {
    let binding: ActionBinding = serde_yaml::from_str(
        "type_name: tenant\naction_name: tenant_get\nconditions:\n  - role_binding: {}\n  - relationship_action: {relation: parent, action_name: tenant_get}\n  - {}\n",
    )
    .unwrap();

    assert_eq!(
        binding.conditions,
        vec![
            Condition::role_binding(),
            Condition::relationship_action("parent", "tenant_get"),
            Condition::Unrecognized,
        ]
    );
}

#[test]
fn test_pipeline_error_categories() {
    let error = PipelineError::configuration_error("bad");
    assert_eq!(error.category(), "Configuration");
}
