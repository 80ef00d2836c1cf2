//! TOML description of the units to generate.
//!
//! ```toml
//! [layout]
//! source_output = "generated"
//!
//! [vars]
//! prop = "name"
//!
//! [[unit]]
//! kind = "class"
//! name = "demo.Person"
//!
//! [[unit.fields]]
//! type = "String"
//! name = "name"
//! ```

use crate::registry::RenderResult;
use codegen::{GenerationConfig, VarContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_access() -> String {
    "public".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationPlan {
    #[serde(default)]
    pub layout: GenerationConfig,
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitSpec>,
}

impl GenerationPlan {
    pub fn from_toml_str(source: &str) -> RenderResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> RenderResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn var_context(&self) -> VarContext {
        VarContext::from(self.vars.clone())
    }
}

/// One generated file. `kind` selects the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSpec {
    pub kind: String,
    /// Qualified name, e.g. `com.example.Foo`. When `package` is set the
    /// name is taken verbatim, which suits resource files with extensions.
    pub name: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default = "default_access")]
    pub access: String,
    #[serde(default)]
    pub modifiers: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
    /// Raw lines for non-Java units.
    #[serde(default)]
    pub lines: Vec<String>,
}

impl UnitSpec {
    /// `package.name` when a package is given, otherwise `name`.
    pub fn qualified_name(&self) -> String {
        match self.package.as_deref() {
            Some(pkg) if !pkg.is_empty() => format!("{}.{}", pkg, self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSpec {
    #[serde(default = "default_access")]
    pub access: String,
    #[serde(default)]
    pub modifiers: String,
    /// Empty for constructors.
    #[serde(default)]
    pub returns: String,
    pub name: String,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    #[serde(default)]
    pub throws: Vec<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgSpec {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}
