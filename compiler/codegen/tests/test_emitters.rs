use std::fs;
use std::sync::Mutex;

use elegen_codegen::emitters::{
    emit_identities, emit_model, emit_relationships, IDENTITIES_FILE, RELATIONSHIPS_FILE,
};
use elegen_codegen::{extract_symbols, CodegenError, EmitContext, Renderer, TeraRenderer};
use serde_json::Value;
use spec::{Attribute, AttributeType, ChildApi, Specification, SpecificationSet};

/// Records every render call and returns the template name as output.
#[derive(Default)]
struct RecordingRenderer {
    calls: Mutex<Vec<(String, Value)>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, template_name: &str, context: &Value) -> elegen_codegen::Result<String> {
        self.calls.lock().expect("poisoned").push((template_name.to_string(), context.clone()));
        Ok(format!("// {template_name}\n"))
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, template_name: &str, _context: &Value) -> elegen_codegen::Result<String> {
        Err(CodegenError::Render { template: template_name.to_string(), message: "boom".into() })
    }
}

fn create_test_set() -> SpecificationSet {
    let mut root = Specification::new("root", "Root");
    root.child_apis = vec![ChildApi::new("list", "root")];

    let mut list = Specification::new("list", "List");
    list.allows_get = true;
    list.allows_update = true;
    list.child_apis = vec![ChildApi::new("task", "child")];

    let mut task = Specification::new("task", "Task");
    task.allows_get = true;
    task.allows_delete = true;
    let mut status = Attribute::new("status", AttributeType::Enum);
    status.allowed_choices = vec!["DONE".into(), "in_progress".into()];
    status.description = "The status of the task.".into();
    let mut owner = Attribute::new("owner", AttributeType::External);
    owner.local_type = Some("Owner;User;github.com/acme/users".into());
    let mut id = Attribute::new("ID", AttributeType::String);
    id.identifier = true;
    task.attributes = vec![id, Attribute::new("name", AttributeType::String), status, owner];

    SpecificationSet::from_specifications(vec![root, list, task]).expect("Failed to build set")
}

fn create_test_context(dir: &std::path::Path) -> EmitContext {
    EmitContext {
        package_name: "models".into(),
        header: "// Code generated by elegen. DO NOT EDIT.".into(),
        model_version: 1,
        public_mode: false,
        output_dir: dir.join("elemental"),
    }
}

#[test]
fn test_emit_model_writes_lowercased_filename() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let renderer = RecordingRenderer::default();
    let task = set.get("task").expect("task");

    let path = emit_model(&renderer, task, &set, &extract_symbols(task), &ctx).expect("emit");

    assert_eq!(path, ctx.output_dir.join("task.go"));
    let calls = renderer.calls.lock().expect("poisoned");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "model.go.tera");
    assert_eq!(calls[0].1["entity_name"], "Task");
    assert_eq!(calls[0].1["imports"], serde_json::json!(["github.com/acme/users"]));
}

#[test]
fn test_render_failure_writes_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let task = set.get("task").expect("task");

    let err = emit_model(&FailingRenderer, task, &set, &extract_symbols(task), &ctx).unwrap_err();

    assert!(matches!(err, CodegenError::Render { .. }));
    assert!(!ctx.output_dir.join("task.go").exists());
}

#[test]
fn test_tera_model_output() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let renderer = TeraRenderer::new().expect("Failed to load templates");
    let task = set.get("task").expect("task");

    let path = emit_model(&renderer, task, &set, &extract_symbols(task), &ctx).expect("emit");
    let source = fs::read_to_string(path).expect("Failed to read model");

    assert!(source.starts_with("// Code generated by elegen. DO NOT EDIT.\n"));
    assert!(source.contains("package models"));
    assert!(source.contains("\"github.com/acme/users\""));
    assert!(source.contains("type TaskStatusValue string"));
    assert!(source.contains("TaskStatusDONE TaskStatusValue = \"DONE\""));
    assert!(source.contains("TaskStatusInProgress TaskStatusValue = \"in_progress\""));
    assert!(source.contains("var TaskIdentity = elemental.Identity{"));
    assert!(source.contains("Category: \"tasks\""));
    assert!(source.contains("type TasksList []*Task"));
    assert!(source.contains("Status TaskStatusValue `json:\"status\""));
    assert!(source.contains("Owner interface{} `json:\"owner\""));
    assert!(source.contains("// The status of the task."));
}

#[test]
fn test_tera_model_lists_children() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let renderer = TeraRenderer::new().expect("Failed to load templates");
    let list = set.get("list").expect("list");

    let path = emit_model(&renderer, list, &set, &extract_symbols(list), &ctx).expect("emit");
    let source = fs::read_to_string(path).expect("Failed to read model");

    assert!(source.contains("var ListChildren = map[elemental.Identity]string{"));
    assert!(source.contains("TaskIdentity: \"child\","));
}

#[test]
fn test_tera_registries_output() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let renderer = TeraRenderer::new().expect("Failed to load templates");
    let relationships = registry::aggregate(&set).expect("aggregate");

    let identities = emit_identities(&renderer, &set, &ctx).expect("emit identities");
    let relations = emit_relationships(&renderer, &relationships, &set, &ctx).expect("emit relationships");

    assert_eq!(identities, ctx.output_dir.join(IDENTITIES_FILE));
    assert_eq!(relations, ctx.output_dir.join(RELATIONSHIPS_FILE));

    let identities = fs::read_to_string(identities).expect("Failed to read identities");
    assert!(identities.contains("\"list\": ListIdentity,"));
    assert!(identities.contains("\"tasks\": TaskIdentity,"));
    assert!(identities.contains("func ModelVersion() float64 { return 1 }"));

    let relations = fs::read_to_string(relations).expect("Failed to read relationships");
    assert!(relations.contains("relationshipsRegistry[RootIdentity] = &elemental.Relationship{\n\t\tType: \"root\",\n\t}"));
    assert!(relations.contains("relationshipsRegistry[TaskIdentity] = &elemental.Relationship{"));
    assert!(relations.contains("Delete: map[string]*elemental.RelationshipInfo{"));
    assert!(relations.contains("\"list\": {},"));
    assert!(!relations.contains("map[string]bool"));
}

#[test]
fn test_tera_model_implements_identifiable_and_list_methods() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let renderer = TeraRenderer::new().expect("Failed to load templates");

    let task = set.get("task").expect("task");
    let path = emit_model(&renderer, task, &set, &extract_symbols(task), &ctx).expect("emit");
    let source = fs::read_to_string(path).expect("Failed to read model");
    assert!(source.contains("func (o *Task) Identifier() string {\n\n\treturn o.ID\n}"));
    assert!(source.contains("func (o *Task) SetIdentifier(id string) {\n\n\to.ID = id\n}"));
    assert!(source.contains("func (o TasksList) List() elemental.IdentifiablesList {"));
    assert!(source.contains("func (o TasksList) DefaultOrder() []string {"));
    assert!(!source.contains("Private:"));

    let root = set.get("root").expect("root");
    let path = emit_model(&renderer, root, &set, &extract_symbols(root), &ctx).expect("emit");
    let source = fs::read_to_string(path).expect("Failed to read model");
    assert!(source.contains("func (o *Root) Identifier() string {\n\n\treturn \"\"\n}"));
    assert!(source.contains("func (o *Root) SetIdentifier(id string) {"));
    assert!(!source.contains("o.ID"));
}

#[test]
fn test_tera_manager_exposes_identifiables() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let set = create_test_set();
    let ctx = create_test_context(dir.path());
    let renderer = TeraRenderer::new().expect("Failed to load templates");

    let path = emit_identities(&renderer, &set, &ctx).expect("emit identities");
    let source = fs::read_to_string(path).expect("Failed to read identities");
    assert!(source.contains("func (f modelManager) IdentifiableFromString(any string) elemental.Identifiable {"));
    assert!(source.contains("func (f modelManager) Identifiables(identity elemental.Identity) elemental.Identifiables {"));
    assert!(source.contains("return &TasksList{}"));
    assert!(source.contains("func Manager() modelManager { return manager }"));
    assert!(!source.contains("elemental.ModelManager"));
}

#[test]
fn test_tera_output_escapes_string_literals() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let mut root = Specification::new("root", "Root");
    root.child_apis = vec![ChildApi::new("task", "a\"b")];
    let mut task = Specification::new("task", "Task");
    task.resource_name = Some("ta\"sks".into());
    let set = SpecificationSet::from_specifications(vec![root, task]).expect("Failed to build set");
    let ctx = create_test_context(dir.path());
    let renderer = TeraRenderer::new().expect("Failed to load templates");

    let root = set.get("root").expect("root");
    let path = emit_model(&renderer, root, &set, &extract_symbols(root), &ctx).expect("emit");
    let model = fs::read_to_string(path).expect("Failed to read model");
    assert!(model.contains("TaskIdentity: \"a\\\"b\","));

    let task = set.get("task").expect("task");
    let path = emit_model(&renderer, task, &set, &extract_symbols(task), &ctx).expect("emit");
    let model = fs::read_to_string(path).expect("Failed to read model");
    assert!(model.contains("Category: \"ta\\\"sks\","));

    let path = emit_identities(&renderer, &set, &ctx).expect("emit identities");
    let identities = fs::read_to_string(path).expect("Failed to read identities");
    assert!(identities.contains("\"ta\\\"sks\": TaskIdentity,"));
}
