use crate::error::{EmitError, EmitResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// One level of indentation. Repeated once per level.
    pub indent_unit: String,
    /// Emitted by the comma slot on every query after the first.
    pub separator: String,
    pub line_ending: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            separator: ", ".to_string(),
            line_ending: "\n".to_string(),
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_unit(mut self, indent_unit: impl Into<String>) -> Self {
        self.indent_unit = indent_unit.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indent_unit.is_empty() {
            return Err("Indent unit cannot be empty".to_string());
        }

        if !self.indent_unit.chars().all(|c| c == ' ' || c == '\t') {
            return Err("Indent unit must consist of spaces or tabs".to_string());
        }

        if self.separator.is_empty() {
            return Err("Separator cannot be empty".to_string());
        }

        if self.line_ending != "\n" && self.line_ending != "\r\n" {
            return Err("Line ending must be \\n or \\r\\n".to_string());
        }

        Ok(())
    }

    /// Parses and validates a TOML document holding the writer settings.
    pub fn from_toml_str(source: &str) -> EmitResult<Self> {
        let config: WriterConfig = toml::from_str(source)?;
        config
            .validate()
            .map_err(|message| EmitError::InvalidConfig { message })?;
        Ok(config)
    }
}
