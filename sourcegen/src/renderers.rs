//! Built-in renderers for the `class` and `resource` unit kinds.

use crate::plan::UnitSpec;
use crate::registry::{RenderError, RenderResult, UnitRenderer};
use codegen::{
    split_qualified, CodeWriter, GenerationSupport, JavaSourceWriter, VarContext, WriterConfig,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Renders a Java class: optional header comment, package and imports,
/// then the class with its private fields and methods. Method bodies are
/// expanded against the plan's variables.
pub struct ClassRenderer;

impl ClassRenderer {
    pub fn new() -> Self {
        Self
    }

    fn emit<W: Write>(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        jw: &mut JavaSourceWriter<W>,
    ) -> RenderResult<()> {
        let qualified = unit.qualified_name();
        let (pkg, class) = split_qualified(&qualified);
        if class.is_empty() {
            return Err(RenderError::InvalidUnit {
                name: unit.name.clone(),
                message: "class name is empty".to_string(),
            });
        }
        debug!("Rendering class {} in package '{}'", class, pkg);

        if !unit.header.is_empty() {
            jw.comment(&as_strs(&unit.header));
        }
        if !pkg.is_empty() {
            jw.package_line(pkg);
            jw.empty_line();
        }
        for import in &unit.imports {
            jw.import_line(import);
        }
        if !unit.imports.is_empty() {
            jw.empty_line();
        }

        if let Some(doc) = &unit.doc {
            jw.javadoc_with(false, &[doc.as_str()]);
        }
        jw.beg_class(&unit.access, &unit.modifiers, class);
        if let Some(extends) = &unit.extends {
            jw.extends_class(extends);
        }
        for interface in &unit.implements {
            jw.implements_interface(interface);
        }

        for field in &unit.fields {
            jw.private_field(&field.ty, &field.name, field.doc.as_deref());
        }

        for (ix, method) in unit.methods.iter().enumerate() {
            if ix > 0 {
                jw.empty_line();
            }
            if let Some(doc) = &method.doc {
                jw.javadoc_with(false, &[doc.as_str()]);
            }
            for annotation in &method.annotations {
                jw.annotation(annotation, &[]);
            }
            jw.beg_method(&method.access, &method.modifiers, &method.returns, &method.name);
            for arg in &method.args {
                jw.method_arg(&arg.ty, &arg.name);
            }
            for exception in &method.throws {
                jw.method_exception(exception);
            }
            jw.contentln_expanded(vars, &method.body);
            jw.end_method();
        }
        jw.end_class();

        match jw.take_error() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

impl Default for ClassRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRenderer for ClassRenderer {
    fn kind(&self) -> &str {
        "class"
    }

    fn render(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        config: &WriterConfig,
        out: &mut dyn Write,
    ) -> RenderResult<()> {
        let mut jw = JavaSourceWriter::with_config(out, config.clone());
        self.emit(unit, vars, &mut jw)?;
        jw.finish()?;
        Ok(())
    }

    fn write(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        support: &GenerationSupport,
    ) -> RenderResult<PathBuf> {
        let qualified = unit.qualified_name();
        let path = support.source_file_path(&qualified)?;
        let mut jw = support.java_source_writer(&qualified)?;
        self.emit(unit, vars, &mut jw)?;
        jw.finish()?;
        Ok(path)
    }
}

/// Writes `lines`, expanded against the plan's variables, as a resource.
/// The package is the unit's `package`, or else everything before the last
/// dot of its name.
pub struct ResourceRenderer;

impl ResourceRenderer {
    pub fn new() -> Self {
        Self
    }

    fn emit<W: Write>(&self, unit: &UnitSpec, vars: &VarContext, writer: &mut CodeWriter<W>) {
        writer.contentln_expanded(vars, &unit.lines);
    }
}

impl Default for ResourceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRenderer for ResourceRenderer {
    fn kind(&self) -> &str {
        "resource"
    }

    fn render(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        config: &WriterConfig,
        out: &mut dyn Write,
    ) -> RenderResult<()> {
        let mut writer = CodeWriter::with_config(out, config.clone());
        self.emit(unit, vars, &mut writer);
        writer.finish()?;
        Ok(())
    }

    fn write(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        support: &GenerationSupport,
    ) -> RenderResult<PathBuf> {
        let (pkg, name) = match &unit.package {
            Some(pkg) => (pkg.as_str(), unit.name.as_str()),
            None => split_qualified(&unit.name),
        };
        if name.is_empty() {
            return Err(RenderError::InvalidUnit {
                name: unit.name.clone(),
                message: "resource name is empty".to_string(),
            });
        }
        let path = support.resource_file_path(pkg, name)?;
        let file = support.resource_file(pkg, name)?;
        let mut writer = CodeWriter::with_config(file, support.config().writer.clone());
        self.emit(unit, vars, &mut writer);
        writer.finish()?;
        Ok(path)
    }
}

fn as_strs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(source: &str) -> UnitSpec {
        toml::from_str(source).unwrap()
    }

    fn render(renderer: &dyn UnitRenderer, unit: &UnitSpec, vars: &VarContext) -> String {
        let mut out = Vec::new();
        renderer
            .render(unit, vars, &WriterConfig::default(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_class_with_members() {
        let unit = unit(
            r#"
            kind = "class"
            name = "demo.Person"
            doc = "A person."
            implements = ["Comparable<Person>"]

            [[fields]]
            type = "String"
            name = "name"

            [[methods]]
            returns = ""
            name = "Person"
            body = ["this.${prop} = ${prop};"]

            [[methods.args]]
            type = "String"
            name = "name"

            [[methods]]
            returns = "int"
            name = "compareTo"
            annotations = ["Override"]
            body = ["return ${prop}.compareTo(other.${get:prop});"]

            [[methods.args]]
            type = "Person"
            name = "other"
            "#,
        );
        let vars = VarContext::new().with("prop", "name");

        let expected = "package demo;\n\
                        \n\
                        /** A person. */\n\
                        public class Person implements Comparable<Person> {\n    \
                            private String name;\n    \
                            \n    \
                            public Person(String name) {\n        \
                                this.name = name;\n    \
                            }\n    \
                            \n    \
                            @Override\n    \
                            public int compareTo(Person other) {\n        \
                                return name.compareTo(other.getName());\n    \
                            }\n\
                        }\n";
        assert_eq!(render(&ClassRenderer::new(), &unit, &vars), expected);
    }

    #[test]
    fn test_class_with_header_imports_and_throws() {
        let unit = unit(
            r#"
            kind = "class"
            name = "Loader"
            access = ""
            header = ["Generated."]
            imports = ["java.io.*"]
            extends = "Base"

            [[methods]]
            returns = "void"
            name = "load"
            throws = ["IOException"]
            "#,
        );

        let expected = "/*\n * Generated.\n */\n\
                        import java.io.*;\n\
                        \n\
                        class Loader extends Base {\n    \
                            public void load() throws IOException {\n    \
                            }\n\
                        }\n";
        assert_eq!(render(&ClassRenderer::new(), &unit, &VarContext::new()), expected);
    }

    #[test]
    fn test_class_requires_name() {
        let unit = unit("kind = \"class\"\nname = \"demo.\"\n");
        let mut out = Vec::new();
        let result = ClassRenderer::new().render(
            &unit,
            &VarContext::new(),
            &WriterConfig::default(),
            &mut out,
        );
        assert!(matches!(result, Err(RenderError::InvalidUnit { .. })));
    }

    #[test]
    fn test_resource_lines_are_expanded() {
        let unit = unit(
            r#"
            kind = "resource"
            name = "conf.app.properties"
            lines = ["app.name=${app}", "app.version=1"]
            "#,
        );
        let vars = VarContext::new().with("app", "demo");
        assert_eq!(
            render(&ResourceRenderer::new(), &unit, &vars),
            "app.name=demo\napp.version=1\n"
        );
    }
}
