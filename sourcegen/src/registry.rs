use crate::plan::{GenerationPlan, UnitSpec};
use crate::renderers::{ClassRenderer, ResourceRenderer};
use codegen::{EmitError, GenerationSupport, VarContext, WriterConfig};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown unit kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Invalid unit {name}: {message}")]
    InvalidUnit { name: String, message: String },

    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plan parse error: {0}")]
    PlanParse(#[from] toml::de::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Turns one [`UnitSpec`] into text.
pub trait UnitRenderer: Send + Sync {
    fn kind(&self) -> &str;

    /// Renders `unit` into an arbitrary sink.
    fn render(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        config: &WriterConfig,
        out: &mut dyn Write,
    ) -> RenderResult<()>;

    /// Writes `unit` to its place in the output layout and returns the path.
    fn write(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        support: &GenerationSupport,
    ) -> RenderResult<PathBuf>;
}

/// Maps a unit `kind` to the renderer handling it.
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn UnitRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// A registry holding the `class` and `resource` renderers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ClassRenderer::new()));
        registry.register(Box::new(ResourceRenderer::new()));
        registry
    }

    pub fn register(&mut self, renderer: Box<dyn UnitRenderer>) {
        let kind = renderer.kind().to_string();
        self.renderers.insert(kind, renderer);
    }

    pub fn get(&self, kind: &str) -> Option<&dyn UnitRenderer> {
        self.renderers.get(kind).map(|r| r.as_ref())
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.renderers.keys().map(|s| s.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }

    fn lookup(&self, kind: &str) -> RenderResult<&dyn UnitRenderer> {
        self.get(kind).ok_or_else(|| RenderError::UnknownKind {
            kind: kind.to_string(),
        })
    }

    pub fn render(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        config: &WriterConfig,
        out: &mut dyn Write,
    ) -> RenderResult<()> {
        self.lookup(&unit.kind)?.render(unit, vars, config, out)
    }

    pub fn write(
        &self,
        unit: &UnitSpec,
        vars: &VarContext,
        support: &GenerationSupport,
    ) -> RenderResult<PathBuf> {
        let path = self.lookup(&unit.kind)?.write(unit, vars, support)?;
        info!("Generated {} {} -> {}", unit.kind, unit.name, path.display());
        Ok(path)
    }

    /// Fails on the first unit whose kind has no renderer.
    fn check_kinds(&self, plan: &GenerationPlan) -> RenderResult<()> {
        for unit in &plan.units {
            self.lookup(&unit.kind)?;
        }
        Ok(())
    }

    /// Renders every unit of `plan` into `out`, each preceded by a
    /// `// ---- name (kind)` marker line. The layout is validated and kinds
    /// are checked before anything is written.
    pub fn render_plan(&self, plan: &GenerationPlan, out: &mut dyn Write) -> RenderResult<()> {
        plan.layout
            .validate()
            .map_err(|message| EmitError::InvalidConfig { message })?;
        self.check_kinds(plan)?;

        let vars = plan.var_context();
        for unit in &plan.units {
            writeln!(out, "// ---- {} ({})", unit.name, unit.kind)?;
            self.render(unit, &vars, &plan.layout.writer, out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Writes every unit of `plan`. Kinds are checked up front so an
    /// unknown kind leaves nothing half-written.
    pub fn write_plan(
        &self,
        plan: &GenerationPlan,
        support: &GenerationSupport,
    ) -> RenderResult<Vec<PathBuf>> {
        self.check_kinds(plan)?;

        let vars = plan.var_context();
        plan.units
            .iter()
            .map(|unit| self.write(unit, &vars, support))
            .collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen::GenerationConfig;

    struct UpperRenderer;

    impl UnitRenderer for UpperRenderer {
        fn kind(&self) -> &str {
            "upper"
        }

        fn render(
            &self,
            unit: &UnitSpec,
            _vars: &VarContext,
            _config: &WriterConfig,
            out: &mut dyn Write,
        ) -> RenderResult<()> {
            out.write_all(unit.name.to_uppercase().as_bytes())?;
            Ok(())
        }

        fn write(
            &self,
            unit: &UnitSpec,
            _vars: &VarContext,
            _support: &GenerationSupport,
        ) -> RenderResult<PathBuf> {
            Ok(PathBuf::from(&unit.name))
        }
    }

    fn unit(kind: &str, name: &str) -> UnitSpec {
        let source = format!("kind = \"{}\"\nname = \"{}\"\n", kind, name);
        toml::from_str(&source).unwrap()
    }

    #[test]
    fn test_builtin_kinds() {
        let registry = RendererRegistry::with_builtin();
        assert_eq!(registry.kinds(), vec!["class", "resource"]);
        assert!(registry.get("class").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_custom_renderer() {
        let mut registry = RendererRegistry::new();
        registry.register(Box::new(UpperRenderer));

        let mut out = Vec::new();
        registry
            .render(
                &unit("upper", "abc"),
                &VarContext::new(),
                &WriterConfig::default(),
                &mut out,
            )
            .unwrap();
        assert_eq!(out, b"ABC");
    }

    #[test]
    fn test_unknown_kind() {
        let registry = RendererRegistry::with_builtin();
        let mut out = Vec::new();
        let result = registry.render(
            &unit("enum", "demo.Color"),
            &VarContext::new(),
            &WriterConfig::default(),
            &mut out,
        );
        assert!(matches!(result, Err(RenderError::UnknownKind { kind }) if kind == "enum"));
    }

    #[test]
    fn test_render_plan_marks_each_unit() {
        let plan = GenerationPlan {
            units: vec![unit("upper", "abc"), unit("upper", "de")],
            ..GenerationPlan::default()
        };
        let mut registry = RendererRegistry::new();
        registry.register(Box::new(UpperRenderer));

        let mut out = Vec::new();
        registry.render_plan(&plan, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "// ---- abc (upper)\nABC// ---- de (upper)\nDE"
        );
    }

    #[test]
    fn test_render_plan_rejects_unknown_kind_before_rendering() {
        let plan = GenerationPlan {
            units: vec![unit("class", "demo.Ok"), unit("enum", "demo.Bad")],
            ..GenerationPlan::default()
        };

        let mut out = Vec::new();
        let result = RendererRegistry::with_builtin().render_plan(&plan, &mut out);
        assert!(matches!(result, Err(RenderError::UnknownKind { kind }) if kind == "enum"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_plan_validates_layout() {
        let mut plan = GenerationPlan {
            units: vec![unit("class", "demo.Ok")],
            ..GenerationPlan::default()
        };
        plan.layout.writer.indent_unit = String::new();

        let mut out = Vec::new();
        let result = RendererRegistry::with_builtin().render_plan(&plan, &mut out);
        assert!(matches!(
            result,
            Err(RenderError::Emit(EmitError::InvalidConfig { .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_plan_rejects_unknown_kind_before_writing() {
        let dir = tempfile::TempDir::new().unwrap();
        let support =
            GenerationSupport::new(GenerationConfig::new().with_base_dir(dir.path())).unwrap();
        let plan = GenerationPlan {
            units: vec![unit("class", "demo.Ok"), unit("enum", "demo.Bad")],
            ..GenerationPlan::default()
        };

        let registry = RendererRegistry::with_builtin();
        assert!(registry.write_plan(&plan, &support).is_err());
        assert!(!support.source_file_path("demo.Ok").unwrap().exists());
    }
}
