//! Streaming code writer.
//!
//! [`CodeWriter`] keeps the state needed to emit source text in a single
//! forward pass:
//!
//! - an indentation prefix, grown and shrunk one unit at a time,
//! - a comma slot and a first-only slot for rendering lists,
//! - a queue of deferred fragments,
//! - a first-call tracker keyed by explicit [`SiteId`]s.
//!
//! Writes come in two flavours. Flushing writes (`print`, `println`,
//! `indent`, `contentln`, `empty_line`, `print_fmt` and the
//! [`fmt::Write`] impl) first emit every deferred fragment in FIFO order.
//! Raw writes (`raw_print`, `raw_print_fmt`, `print_comma`,
//! `print_first_only`) never touch the queue.
//!
//! Deferred fragments let a construct be opened before the number of its
//! trailing clauses is known. A method header can defer `")"` and `" {"`,
//! accept any number of raw-printed arguments, and have both tokens appear
//! once, in order, at the next flushing write:
//!
//! ```
//! use codegen::CodeWriter;
//!
//! let mut w = CodeWriter::in_memory();
//! w.print("void run(");
//! w.delayed_print(")");
//! w.delayed_println(" {");
//! w.new_comma();
//! for arg in ["int a", "int b"] {
//!     w.print_comma();
//!     w.raw_print(arg);
//! }
//! w.increment_indent();
//! w.contentln("go();");
//! w.decrement_indent();
//! w.contentln("}");
//! assert_eq!(w.into_string().unwrap(), "void run(int a, int b) {\n    go();\n}\n");
//! ```
//!
//! Malformed sequences (an end without a begin, unbalanced indentation)
//! produce malformed text; nothing is validated.

use crate::config::WriterConfig;
use crate::deferred::DeferredQueue;
use crate::error::EmitResult;
use crate::expand::VarContext;
use crate::sequence::{SequenceTracker, SiteId};
use crate::slots::{Comma, FirstOnly};
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

pub struct CodeWriter<W: Write> {
    sink: W,
    config: WriterConfig,
    indent: String,
    comma: Comma,
    first_only: FirstOnly,
    deferred: DeferredQueue,
    sequence: SequenceTracker,
    error: Option<io::Error>,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        let comma = Comma::new(config.separator.clone());
        Self {
            sink,
            config,
            indent: String::new(),
            comma,
            first_only: FirstOnly::default(),
            deferred: DeferredQueue::new(),
            sequence: SequenceTracker::new(),
            error: None,
        }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    // Indentation

    pub fn increment_indent(&mut self) {
        self.indent.push_str(&self.config.indent_unit);
    }

    /// Removes one indentation unit. Must not be called at level zero.
    pub fn decrement_indent(&mut self) {
        let unit = self.config.indent_unit.len();
        debug_assert!(
            self.indent.len() >= unit,
            "indentation decremented below zero"
        );
        let len = self.indent.len().saturating_sub(unit);
        self.indent.truncate(len);
    }

    pub fn indent_level(&self) -> usize {
        match self.config.indent_unit.len() {
            0 => 0,
            unit => self.indent.len() / unit,
        }
    }

    pub fn current_indent(&self) -> &str {
        &self.indent
    }

    /// Flushes deferred fragments, then writes the current prefix.
    pub fn indent(&mut self) {
        self.flush_deferred();
        Self::write_to(&mut self.sink, &mut self.error, &self.indent);
    }

    // Comma and first-only slots

    pub fn new_comma(&mut self) {
        self.comma.reset();
    }

    pub fn print_comma(&mut self) {
        let separator = self.comma.next_separator();
        Self::write_to(&mut self.sink, &mut self.error, separator);
    }

    pub fn new_first_only(&mut self, value: impl Into<String>) {
        self.first_only = FirstOnly::new(value);
    }

    pub fn print_first_only(&mut self) {
        let value = self.first_only.take();
        self.write_raw(&value);
    }

    // Deferred fragments

    pub fn delayed_print(&mut self, text: impl Into<String>) {
        self.deferred.push(text);
    }

    pub fn delayed_println(&mut self, text: impl AsRef<str>) {
        let line = format!("{}{}", text.as_ref(), self.config.line_ending);
        self.deferred.push(line);
    }

    /// Writes and clears every deferred fragment, oldest first.
    pub fn flush_deferred(&mut self) {
        for fragment in self.deferred.drain() {
            Self::write_to(&mut self.sink, &mut self.error, &fragment);
        }
    }

    /// Writes the first deferred fragment and blanks it in place, so calling
    /// this again writes nothing until the fragment is removed.
    pub fn flush_first_deferred(&mut self) {
        if let Some(fragment) = self.deferred.replay_first() {
            self.write_raw(&fragment);
        }
    }

    /// Writes and removes the first deferred fragment, promoting the next.
    pub fn flush_and_remove_first_deferred(&mut self) {
        if let Some(fragment) = self.deferred.pop_first() {
            self.write_raw(&fragment);
        }
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    // Flushing writes

    pub fn print(&mut self, text: impl AsRef<str>) {
        self.flush_deferred();
        self.write_raw(text.as_ref());
    }

    pub fn println(&mut self, text: impl AsRef<str>) {
        self.flush_deferred();
        self.write_raw(text.as_ref());
        Self::write_to(&mut self.sink, &mut self.error, &self.config.line_ending);
    }

    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.flush_deferred();
        self.write_raw(&args.to_string());
    }

    /// Writes an indented line terminated by the configured line ending.
    pub fn contentln(&mut self, line: impl AsRef<str>) {
        self.indent();
        self.write_raw(line.as_ref());
        Self::write_to(&mut self.sink, &mut self.error, &self.config.line_ending);
    }

    /// Writes the indentation prefix followed by a line ending.
    pub fn empty_line(&mut self) {
        self.contentln("");
    }

    // Raw writes

    pub fn raw_print(&mut self, text: impl AsRef<str>) {
        self.write_raw(text.as_ref());
    }

    pub fn raw_print_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.write_raw(&args.to_string());
    }

    // Blocks

    /// Writes `header` at the current indentation and defers the opening
    /// brace. Indentation is left to the caller.
    pub fn begin_block(&mut self, header: impl AsRef<str>) {
        self.indent();
        self.print(header);
        self.delayed_println(" {");
    }

    pub fn end_block(&mut self) {
        self.contentln("}");
    }

    // First-call detection

    /// Records `site` as the last caller. Constructs that can be followed by
    /// list items call this so the first item is recognised as such.
    pub fn initialize_on_first(&mut self, site: SiteId) {
        self.sequence.mark(site);
    }

    /// Runs `f` when `site` differs from the last recorded caller, then
    /// records `site`.
    pub fn on_first(&mut self, site: SiteId, f: impl FnOnce(&mut Self)) {
        if self.sequence.is_first(site) {
            f(self);
        }
        self.sequence.mark(site);
    }

    /// Runs `f` when `site` repeats the last recorded caller, then records
    /// `site`.
    pub fn on_non_first(&mut self, site: SiteId, f: impl FnOnce(&mut Self)) {
        if !self.sequence.is_first(site) {
            f(self);
        }
        self.sequence.mark(site);
    }

    // Variable expansion

    pub fn print_expanded(&mut self, vars: &VarContext, text: &str) {
        self.print(vars.expand(text));
    }

    pub fn println_expanded<S: AsRef<str>>(&mut self, vars: &VarContext, texts: &[S]) {
        for text in texts {
            self.println(vars.expand(text.as_ref()));
        }
    }

    pub fn contentln_expanded<S: AsRef<str>>(&mut self, vars: &VarContext, texts: &[S]) {
        for text in texts {
            self.contentln(vars.expand(text.as_ref()));
        }
    }

    // Sink

    /// Whether a write to the sink has failed. Once set, later writes are
    /// dropped.
    pub fn check_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flushes deferred fragments and the sink, then hands the sink back.
    pub fn finish(mut self) -> EmitResult<W> {
        self.flush_deferred();
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.sink.flush()?;
        debug!("Code writer finished at indent level {}", self.indent_level());
        Ok(self.sink)
    }

    fn write_raw(&mut self, text: &str) {
        Self::write_to(&mut self.sink, &mut self.error, text);
    }

    fn write_to(sink: &mut W, error: &mut Option<io::Error>, text: &str) {
        if error.is_some() || text.is_empty() {
            return;
        }
        if let Err(err) = sink.write_all(text.as_bytes()) {
            warn!("Code writer sink failed, dropping further output: {}", err);
            *error = Some(err);
        }
    }
}

impl CodeWriter<Vec<u8>> {
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    pub fn in_memory_with_config(config: WriterConfig) -> Self {
        Self::with_config(Vec::new(), config)
    }

    /// Text written so far, not counting pending deferred fragments.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.sink).into_owned()
    }

    pub fn into_string(self) -> EmitResult<String> {
        let bytes = self.finish()?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl<W: Write> fmt::Write for CodeWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        if self.check_error() {
            return Err(fmt::Error);
        }
        Ok(())
    }
}

impl<W: Write> fmt::Debug for CodeWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeWriter")
            .field("config", &self.config)
            .field("indent_level", &self.indent_level())
            .field("deferred", &self.deferred.len())
            .field("last_site", &self.sequence.last())
            .field("failed", &self.error.is_some())
            .finish()
    }
}
