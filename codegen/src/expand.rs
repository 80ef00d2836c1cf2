//! `${...}` variable expansion for generated text.
//!
//! Supported references, where `value` is the variable's value:
//! - `${name}` renders `value`
//! - `${get:name}` renders `getValue()`
//! - `${set:name}` renders `setValue`
//!
//! References to unknown variables are left untouched.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarContext {
    vars: BTreeMap<String, String>,
}

impl VarContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn expand(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (name, value) in &self.vars {
            let capitalized = capitalize(value);
            result = result.replace(&format!("${{{}}}", name), value);
            result = result.replace(
                &format!("${{get:{}}}", name),
                &format!("get{}()", capitalized),
            );
            result = result.replace(
                &format!("${{set:{}}}", name),
                &format!("set{}", capitalized),
            );
        }
        result
    }
}

impl<K, V> FromIterator<(K, V)> for VarContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = VarContext::new();
        for (name, value) in iter {
            context.set(name, value);
        }
        context
    }
}

impl From<BTreeMap<String, String>> for VarContext {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
