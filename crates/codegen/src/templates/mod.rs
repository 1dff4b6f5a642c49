//! # Preview Templates
//!
//! One template per supported technology. Dispatch goes through a closed
//! `Technology` enum, so an unrecognised name never reaches a template.

pub mod dotnet;
pub mod java;
pub mod node;

pub use dotnet::DotNetTemplate;
pub use java::JavaTemplate;
pub use node::MongooseTemplate;

use crate::context::PreviewContext;
use studio_core::{ColumnType, Technology};

// ============================================================================
// PreviewTemplate Trait
// ============================================================================

/// Renders an entity's persisted-model shape for one technology
pub trait PreviewTemplate: Send + Sync {
    /// Technology this template renders for
    fn technology(&self) -> Technology;

    /// Nearest native type for an abstract column type
    fn type_name(&self, column_type: ColumnType) -> &'static str;

    /// Render the model source for the context's entity
    fn render(&self, ctx: &PreviewContext) -> String;
}

static DOTNET: DotNetTemplate = DotNetTemplate;
static JAVA: JavaTemplate = JavaTemplate;
static MONGOOSE: MongooseTemplate = MongooseTemplate;

/// Strategy table: the template for a technology
pub fn template_for(technology: Technology) -> &'static dyn PreviewTemplate {
    match technology {
        Technology::DotNet => &DOTNET,
        Technology::Java => &JAVA,
        Technology::NodeJs => &MONGOOSE,
    }
}

/// Append `line` indented by `level` steps of four spaces
pub(crate) fn push_line(out: &mut String, level: usize, line: &str) {
    for _ in 0..level {
        out.push_str("    ");
    }
    out.push_str(line);
    out.push('\n');
}
