//! Java construct templates on top of [`CodeWriter`].
//!
//! Every `beg_*` call has a matching `end_*` call. Pairs nest as long as the
//! caller closes them in reverse order of opening.
//!
//! ```
//! use codegen::JavaSourceWriter;
//!
//! let mut jw = JavaSourceWriter::in_memory();
//! jw.package_line("demo");
//! jw.empty_line();
//! jw.beg_class("public", "", "Greeter");
//! jw.implements_interface("Runnable");
//! {
//!     jw.beg_method("public", "", "void", "run");
//!     {
//!         jw.contentln("System.out.println(\"hi\");");
//!     }
//!     jw.end_method();
//! }
//! jw.end_class();
//!
//! assert_eq!(
//!     jw.into_string().unwrap(),
//!     "package demo;\n\
//!      \n\
//!      public class Greeter implements Runnable {\n    \
//!          public void run() {\n        \
//!              System.out.println(\"hi\");\n    \
//!          }\n\
//!      }\n"
//! );
//! ```

use crate::config::WriterConfig;
use crate::error::EmitResult;
use crate::sequence::SiteId;
use crate::writer::CodeWriter;
use std::io::Write;
use std::ops::{Deref, DerefMut};

const CLASS_HEADER: SiteId = SiteId::new("java.class_header");
const IMPLEMENTS: SiteId = SiteId::new("java.implements");
const METHOD_HEADER: SiteId = SiteId::new("java.method_header");
const THROWS: SiteId = SiteId::new("java.throws");

pub struct JavaSourceWriter<W: Write> {
    inner: CodeWriter<W>,
}

impl<W: Write> JavaSourceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            inner: CodeWriter::new(sink),
        }
    }

    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        Self {
            inner: CodeWriter::with_config(sink, config),
        }
    }

    pub fn finish(self) -> EmitResult<W> {
        self.inner.finish()
    }

    // Comments

    fn comment_block(&mut self, start: &str, force_block: bool, lines: &[&str]) {
        self.indent();
        if lines.len() == 1 && !force_block {
            self.print(start);
            self.print(" ");
            self.print(lines[0]);
            self.println(" */");
            return;
        }

        self.println(start);
        for line in lines {
            if line.is_empty() {
                self.contentln(" *");
            } else {
                self.contentln(format!(" * {}", line));
            }
        }
        self.contentln(" */");
    }

    /// `// comment` at the current position, without indentation.
    pub fn single_line_comment(&mut self, comment: &str) {
        self.print("// ");
        self.println(comment);
    }

    pub fn single_line_commentln(&mut self, comment: &str) {
        self.indent();
        self.single_line_comment(comment);
    }

    pub fn comment(&mut self, lines: &[&str]) {
        self.comment_block("/*", true, lines);
    }

    /// A single line renders as `/* text */` unless `force_block` is set.
    pub fn comment_with(&mut self, force_block: bool, lines: &[&str]) {
        self.comment_block("/*", force_block, lines);
    }

    pub fn javadoc(&mut self, lines: &[&str]) {
        self.comment_block("/**", true, lines);
    }

    pub fn javadoc_with(&mut self, force_block: bool, lines: &[&str]) {
        self.comment_block("/**", force_block, lines);
    }

    // File header

    pub fn package_line(&mut self, pkg: &str) {
        self.print("package ");
        self.print(pkg);
        self.println(";");
    }

    /// `spec` is the import without keyword and semicolon, e.g. `java.util.*`.
    pub fn import_line(&mut self, spec: &str) {
        self.print("import ");
        self.print(spec);
        self.println(";");
    }

    /// Writes `@name`, followed by `(k=v, ...)` when `params` is non-empty.
    /// Each param is written as given, e.g. `"name=value"`.
    pub fn annotation(&mut self, name: &str, params: &[&str]) {
        self.indent();
        self.print("@");
        self.print(name);
        if !params.is_empty() {
            self.print("(");
            self.new_comma();
            for param in params {
                self.print_comma();
                self.raw_print(param);
            }
            self.print(")");
        }
        self.println("");
    }

    // Classes

    /// Writes `access modifiers class name` and defers the opening brace so
    /// that [`extends_class`](Self::extends_class) and
    /// [`implements_interface`](Self::implements_interface) can follow.
    pub fn beg_class(&mut self, access: &str, modifiers: &str, name: &str) {
        self.initialize_on_first(CLASS_HEADER);
        self.indent();
        self.print_prefixed(access);
        self.print_prefixed(modifiers);
        self.print("class ");
        self.print(name);
        self.delayed_println(" {");
        self.increment_indent();
    }

    /// Call directly after [`beg_class`](Self::beg_class).
    pub fn extends_class(&mut self, class: &str) {
        self.raw_print(" extends ");
        self.raw_print(class);
    }

    /// Call after `beg_class`, `extends_class` or another
    /// `implements_interface`.
    pub fn implements_interface(&mut self, interface: &str) {
        self.on_first(IMPLEMENTS, |w| {
            w.raw_print(" implements ");
            w.new_comma();
        });
        self.print_comma();
        self.raw_print(interface);
    }

    pub fn end_class(&mut self) {
        self.close_brace();
    }

    // Methods

    /// Writes the method header up to `(`. The closing `)` and ` {` are
    /// deferred as two fragments so that exceptions can be slotted between
    /// them by [`method_exception`](Self::method_exception).
    pub fn beg_method(&mut self, access: &str, modifiers: &str, return_type: &str, name: &str) {
        self.initialize_on_first(METHOD_HEADER);
        self.indent();
        self.print_prefixed(access);
        self.print_prefixed(modifiers);
        self.print_prefixed(return_type);
        self.print(name);
        self.print("(");

        self.delayed_print(")");
        self.delayed_println(" {");

        self.increment_indent();
        self.new_comma();
    }

    pub fn begin_constructor(&mut self, name: &str) {
        self.beg_method("", "", "", name);
    }

    /// Call after `beg_method` or another `method_arg`.
    pub fn method_arg(&mut self, ty: &str, name: &str) {
        self.print_comma();
        self.raw_print(ty);
        self.raw_print(" ");
        self.raw_print(name);
    }

    /// Call once per thrown exception, after `beg_method` or `method_arg`.
    /// The first call of a run closes the argument list.
    pub fn method_exception(&mut self, exception: &str) {
        self.on_first(THROWS, |w| {
            w.flush_and_remove_first_deferred();
            w.raw_print(" throws ");
            w.new_comma();
        });
        self.print_comma();
        self.raw_print(exception);
    }

    pub fn end_method(&mut self) {
        self.close_brace();
    }

    // Fields

    pub fn field(&mut self, access: &str, ty: &str, name: &str) {
        self.indent();
        self.print_prefixed(access);
        self.print(ty);
        self.print(" ");
        self.print(name);
        self.println(";");
    }

    /// A private field preceded by an optional one-line javadoc and followed
    /// by an empty line.
    pub fn private_field(&mut self, ty: &str, name: &str, doc: Option<&str>) {
        if let Some(doc) = doc {
            self.javadoc_with(false, &[doc]);
        }
        self.field("private", ty, name);
        self.empty_line();
    }

    // if

    /// Writes the complete `if (criteria) {` line.
    pub fn beg_if(&mut self, criteria: &str) {
        self.open_statement("if", criteria);
    }

    /// Writes `if (` and defers `) {`. Complete the condition with
    /// [`if_criteria`](Self::if_criteria).
    pub fn beg_if_deferred(&mut self) {
        self.open_deferred_statement("if");
    }

    pub fn if_criteria(&mut self, criteria: &str) {
        self.raw_print(criteria);
    }

    pub fn end_if(&mut self) {
        self.close_brace();
    }

    // while

    pub fn beg_while(&mut self, criteria: &str) {
        self.open_statement("while", criteria);
    }

    pub fn beg_while_deferred(&mut self) {
        self.open_deferred_statement("while");
    }

    pub fn while_criteria(&mut self, criteria: &str) {
        self.raw_print(criteria);
    }

    pub fn end_while(&mut self) {
        self.close_brace();
    }

    // for

    pub fn beg_for(&mut self, init: &str, compare: &str, increment: &str) {
        let header = format!("{}; {}; {}", init, compare, increment);
        self.open_statement("for", &header);
    }

    /// `for (item_decl : items) {`
    pub fn beg_for_each(&mut self, item_decl: &str, items: &str) {
        let header = format!("{} : {}", item_decl, items);
        self.open_statement("for", &header);
    }

    pub fn end_for(&mut self) {
        self.close_brace();
    }

    fn open_statement(&mut self, keyword: &str, header: &str) {
        self.indent();
        self.print(keyword);
        self.print(" (");
        self.print(header);
        self.println(") {");
        self.increment_indent();
    }

    fn open_deferred_statement(&mut self, keyword: &str) {
        self.indent();
        self.print(keyword);
        self.print(" (");
        self.delayed_println(") {");
        self.increment_indent();
    }

    fn close_brace(&mut self) {
        self.decrement_indent();
        self.contentln("}");
    }

    /// Prints `word ` when `word` is non-empty.
    fn print_prefixed(&mut self, word: &str) {
        if !word.is_empty() {
            self.print(word);
            self.print(" ");
        }
    }
}

impl JavaSourceWriter<Vec<u8>> {
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    pub fn into_string(self) -> EmitResult<String> {
        self.inner.into_string()
    }
}

impl<W: Write> Deref for JavaSourceWriter<W> {
    type Target = CodeWriter<W>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<W: Write> DerefMut for JavaSourceWriter<W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
