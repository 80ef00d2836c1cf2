pub mod plan;
pub mod registry;
pub mod renderers;

pub use plan::{ArgSpec, FieldSpec, GenerationPlan, MethodSpec, UnitSpec};
pub use registry::{RenderError, RenderResult, RendererRegistry, UnitRenderer};
pub use renderers::{ClassRenderer, ResourceRenderer};
