//! Source code emission for code generators.
//!
//! [`CodeWriter`] is a streaming writer with indentation, list separators and
//! deferred tokens. [`JavaSourceWriter`] builds Java constructs on top of it,
//! and [`GenerationSupport`] decides where generated files land on disk.

pub mod config;
pub mod deferred;
pub mod error;
pub mod expand;
pub mod generation;
pub mod java;
pub mod sequence;
pub mod slots;
pub mod writer;

pub use config::WriterConfig;
pub use deferred::DeferredQueue;
pub use error::{EmitError, EmitResult};
pub use expand::VarContext;
pub use generation::{split_qualified, GenerationConfig, GenerationSupport, ResourceReference};
pub use java::JavaSourceWriter;
pub use sequence::{SequenceTracker, SiteId};
pub use slots::{Comma, FirstOnly};
pub use writer::CodeWriter;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::expand::*;
    pub use crate::generation::*;
    pub use crate::java::*;
    pub use crate::sequence::*;
    pub use crate::writer::*;
}
