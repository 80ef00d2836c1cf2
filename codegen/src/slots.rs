//! Single-slot helpers for list rendering.
//!
//! [`Comma`] yields nothing on its first query and the separator afterwards,
//! so it can be printed in front of every item of a list. [`FirstOnly`] hands
//! out its value exactly once, which suits leading keywords such as
//! `throws` or `implements`.

/// Two-state separator generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comma {
    separator: String,
    used: bool,
}

impl Comma {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            used: false,
        }
    }

    /// Returns `""` on the first call after construction or [`reset`](Self::reset),
    /// the separator on every call after that.
    pub fn next_separator(&mut self) -> &str {
        if self.used {
            &self.separator
        } else {
            self.used = true;
            ""
        }
    }

    pub fn reset(&mut self) {
        self.used = false;
    }
}

impl Default for Comma {
    fn default() -> Self {
        Self::new(", ")
    }
}

/// A value rendered exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstOnly {
    value: String,
}

impl FirstOnly {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the held value and leaves `""` in its place.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }

    pub fn is_spent(&self) -> bool {
        self.value.is_empty()
    }
}
