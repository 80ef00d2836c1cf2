//! Rendering whole plans onto disk.

use codegen::{EmitError, GenerationSupport};
use sourcegen::{GenerationPlan, RenderError, RendererRegistry};
use std::fs;
use tempfile::TempDir;

const PLAN: &str = r#"
[layout]
source_output = "generated"

[layout.writer]
indent_unit = "  "

[vars]
field = "count"

[[unit]]
kind = "class"
name = "demo.Counter"
modifiers = "final"

[[unit.fields]]
type = "int"
name = "count"

[[unit.methods]]
returns = "int"
name = "next"
body = ["return ++${field};"]

[[unit.methods]]
returns = "void"
name = "reset"
throws = ["IllegalStateException"]
body = ["${field} = 0;"]

[[unit]]
kind = "resource"
package = "demo"
name = "counter.properties"
lines = ["field=${field}", "accessor=${get:field}"]
"#;

fn support_for(plan: &mut GenerationPlan, dir: &TempDir) -> GenerationSupport {
    plan.layout.base_dir = dir.path().to_path_buf();
    GenerationSupport::new(plan.layout.clone()).unwrap()
}

#[test]
fn test_write_plan_to_disk() {
    let dir = TempDir::new().unwrap();
    let mut plan = GenerationPlan::from_toml_str(PLAN).unwrap();
    let support = support_for(&mut plan, &dir);

    let registry = RendererRegistry::with_builtin();
    let paths = registry.write_plan(&plan, &support).unwrap();

    let class_path = dir.path().join("generated/demo/Counter.java");
    let resource_path = dir.path().join("generated/demo/counter.properties");
    assert_eq!(paths, vec![class_path.clone(), resource_path.clone()]);

    let class = fs::read_to_string(class_path).unwrap();
    assert_eq!(
        class,
        [
            "package demo;",
            "",
            "public final class Counter {",
            "  private int count;",
            "  ",
            "  public int next() {",
            "    return ++count;",
            "  }",
            "  ",
            "  public void reset() throws IllegalStateException {",
            "    count = 0;",
            "  }",
            "}",
            "",
        ]
        .join("\n")
    );

    let resource = fs::read_to_string(resource_path).unwrap();
    assert_eq!(resource, "field=count\naccessor=getCount()\n");
}

#[test]
fn test_rewrite_truncates_previous_output() {
    let dir = TempDir::new().unwrap();
    let mut plan = GenerationPlan::from_toml_str(PLAN).unwrap();
    let support = support_for(&mut plan, &dir);
    let registry = RendererRegistry::with_builtin();

    let resource_path = dir.path().join("generated/demo/counter.properties");
    fs::create_dir_all(resource_path.parent().unwrap()).unwrap();
    fs::write(&resource_path, "stale content that is longer than the new one\n").unwrap();

    registry.write_plan(&plan, &support).unwrap();
    assert_eq!(
        fs::read_to_string(resource_path).unwrap(),
        "field=count\naccessor=getCount()\n"
    );
}

#[test]
fn test_invalid_class_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut plan = GenerationPlan::from_toml_str(
        r#"
        [[unit]]
        kind = "class"
        name = "demo.9Lives"
        "#,
    )
    .unwrap();
    let support = support_for(&mut plan, &dir);

    let result = RendererRegistry::with_builtin().write_plan(&plan, &support);
    assert!(matches!(result, Err(RenderError::Emit(_))));
}

#[test]
fn test_render_to_buffer_uses_plan_writer_config() {
    let plan = GenerationPlan::from_toml_str(PLAN).unwrap();
    let registry = RendererRegistry::with_builtin();
    let vars = plan.var_context();

    let mut out = Vec::new();
    registry
        .render(&plan.units[0], &vars, &plan.layout.writer, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\n  private int count;\n"));
    assert!(text.ends_with("  }\n}\n"));
}

#[test]
fn test_resource_name_cannot_leave_output_root() {
    let dir = TempDir::new().unwrap();
    for name in ["/abs/x.properties", "../x.properties"] {
        let source = format!(
            "[[unit]]\nkind = \"resource\"\npackage = \"demo\"\nname = \"{}\"\nlines = [\"a=b\"]\n",
            name
        );
        let mut plan = GenerationPlan::from_toml_str(&source).unwrap();
        let support = support_for(&mut plan, &dir);

        let result = RendererRegistry::with_builtin().write_plan(&plan, &support);
        assert!(
            matches!(result, Err(RenderError::Emit(EmitError::InvalidName { .. }))),
            "{} should be rejected",
            name
        );
    }
    assert!(!dir.path().join("target/x.properties").exists());
}
