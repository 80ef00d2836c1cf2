//! Placement of generated sources and resources on disk.
//!
//! All paths are resolved against [`GenerationConfig::base_dir`]. Generated
//! Java sources and package-relative resources go under the source output
//! root; "maven" resources go under the resource root.

use crate::config::WriterConfig;
use crate::error::{EmitError, EmitResult};
use crate::java::JavaSourceWriter;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_dir: PathBuf,
    /// Relative to `base_dir`.
    pub source_output: PathBuf,
    /// Relative to `base_dir`.
    pub resource_root: PathBuf,
    pub writer: WriterConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_output: PathBuf::from("target/generated-sources"),
            resource_root: PathBuf::from("src/main/resources"),
            writer: WriterConfig::default(),
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_source_output(mut self, source_output: impl Into<PathBuf>) -> Self {
        self.source_output = source_output.into();
        self
    }

    pub fn with_resource_root(mut self, resource_root: impl Into<PathBuf>) -> Self {
        self.resource_root = resource_root.into();
        self
    }

    pub fn with_writer(mut self, writer: WriterConfig) -> Self {
        self.writer = writer;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.source_output.as_os_str().is_empty() {
            return Err("Source output directory cannot be empty".to_string());
        }

        if self.source_output.is_absolute() || self.resource_root.is_absolute() {
            return Err("Output roots must be relative to the base directory".to_string());
        }

        self.writer.validate()
    }
}

/// Creates writers for generated files according to a [`GenerationConfig`].
#[derive(Debug, Clone)]
pub struct GenerationSupport {
    config: GenerationConfig,
}

impl GenerationSupport {
    pub fn new(config: GenerationConfig) -> EmitResult<Self> {
        config
            .validate()
            .map_err(|message| EmitError::InvalidConfig { message })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn source_root(&self) -> PathBuf {
        self.config.base_dir.join(&self.config.source_output)
    }

    pub fn resource_root(&self) -> PathBuf {
        self.config.base_dir.join(&self.config.resource_root)
    }

    /// `a.b.C` maps to `<source root>/a/b/C.java`.
    pub fn source_file_path(&self, qualified_name: &str) -> EmitResult<PathBuf> {
        let segments = validate_qualified_name(qualified_name)?;
        let mut path = self.source_root();
        let (class, packages) = segments
            .split_last()
            .ok_or_else(|| EmitError::InvalidName {
                name: qualified_name.to_string(),
            })?;
        for segment in packages {
            path.push(segment);
        }
        path.push(format!("{}.java", class));
        Ok(path)
    }

    pub fn java_source_writer(
        &self,
        qualified_name: &str,
    ) -> EmitResult<JavaSourceWriter<BufWriter<File>>> {
        let path = self.source_file_path(qualified_name)?;
        debug!("Producing source file: {} -> {}", qualified_name, path.display());
        let file = create_file(&path)?;
        Ok(JavaSourceWriter::with_config(
            BufWriter::new(file),
            self.config.writer.clone(),
        ))
    }

    /// Path of resource `name` in package `pkg` under the source root.
    /// Absolute names and `..` components are rejected.
    pub fn resource_file_path(&self, pkg: &str, name: &str) -> EmitResult<PathBuf> {
        if name.is_empty() {
            return Err(EmitError::InvalidName {
                name: name.to_string(),
            });
        }
        let mut relative = PathBuf::new();
        for segment in pkg.split('.').filter(|s| !s.is_empty()) {
            relative.push(segment);
        }
        relative.push(name);
        let relative = confined(relative, name)?;
        Ok(self.source_root().join(relative))
    }

    /// Opens a truncating writer for a package-relative resource.
    pub fn resource_file(&self, pkg: &str, name: &str) -> EmitResult<BufWriter<File>> {
        let path = self.resource_file_path(pkg, name)?;
        debug!("Producing resource file: {}.{} -> {}", pkg, name, path.display());
        Ok(BufWriter::new(create_file(&path)?))
    }

    /// Like [`resource_file`](Self::resource_file), splitting
    /// `qualified_name` at its last dot.
    pub fn resource_file_qualified(&self, qualified_name: &str) -> EmitResult<BufWriter<File>> {
        let (pkg, name) = split_qualified(qualified_name);
        self.resource_file(pkg, name)
    }

    /// Opens a writer for `path` under the resource root. A leading `/` is
    /// ignored.
    pub fn maven_resource_file(&self, path: &str) -> EmitResult<BufWriter<File>> {
        let relative = confined(PathBuf::from(path.trim_start_matches('/')), path)?;
        let full = self.resource_root().join(relative);
        debug!("Producing maven resource file: {}", full.display());
        Ok(BufWriter::new(create_file(&full)?))
    }

    /// Opens a writer for `path` relative to the base directory.
    pub fn base_relative_resource_file(&self, path: &str) -> EmitResult<BufWriter<File>> {
        let relative = confined(PathBuf::from(path.trim().trim_start_matches('/')), path)?;
        let full = self.config.base_dir.join(relative);
        debug!("Producing base relative resource file: {}", full.display());
        Ok(BufWriter::new(create_file(&full)?))
    }

    /// Locates `rel_path` below the first existing root among
    /// `try_first_roots`, then the resource root, then the source root.
    /// Candidate roots are resolved against the base directory.
    pub fn best_effort_resource<P: AsRef<Path>>(
        &self,
        rel_path: &str,
        try_first_roots: &[P],
    ) -> EmitResult<ResourceReference> {
        let relative = confined(PathBuf::from(rel_path.trim_start_matches('/')), rel_path)?;
        for root in try_first_roots {
            let root = self.config.base_dir.join(root.as_ref());
            if root.exists() {
                debug!("Resolved resource {} under {}", rel_path, root.display());
                return Ok(ResourceReference::new(root.join(relative)));
            }
        }

        let resource_root = self.resource_root();
        if resource_root.exists() {
            return Ok(ResourceReference::new(resource_root.join(relative)));
        }

        Ok(ResourceReference::new(self.source_root().join(relative)))
    }
}

/// A resource file that can be read and rewritten as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    path: PathBuf,
}

impl ResourceReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn read_to_string(&self) -> EmitResult<String> {
        let mut content = String::new();
        File::open(&self.path)?.read_to_string(&mut content)?;
        Ok(content)
    }

    pub fn write_string(&self, content: &str) -> EmitResult<()> {
        let mut file = create_file(&self.path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Splits at the last dot. A name without a dot, or whose only dot is the
/// first character, has an empty package.
pub fn split_qualified(qualified_name: &str) -> (&str, &str) {
    match qualified_name.rfind('.') {
        Some(ix) if ix > 0 => (&qualified_name[..ix], &qualified_name[ix + 1..]),
        _ => ("", qualified_name),
    }
}

fn validate_qualified_name(qualified_name: &str) -> EmitResult<Vec<&str>> {
    let segments: Vec<&str> = qualified_name.split('.').collect();
    if segments.iter().all(|s| is_java_identifier(s)) {
        Ok(segments)
    } else {
        Err(EmitError::InvalidName {
            name: qualified_name.to_string(),
        })
    }
}

/// Accepts a non-empty relative path made only of normal components, so
/// joining it onto a root stays below that root.
fn confined(relative: PathBuf, name: &str) -> EmitResult<PathBuf> {
    let mut normal = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(EmitError::InvalidName {
                    name: name.to_string(),
                })
            }
        }
    }
    if normal {
        Ok(relative)
    } else {
        Err(EmitError::InvalidName {
            name: name.to_string(),
        })
    }
}

fn is_java_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn create_file(path: &Path) -> EmitResult<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}
