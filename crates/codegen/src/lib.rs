//! # Studio Codegen
//!
//! Code preview for the entity editor.
//!
//! Given the selected entity, the full entity list and a technology name,
//! this crate renders the entity's persisted-model shape in the idiom of the
//! chosen stack:
//!
//! - **DotNet**: an Entity Framework Core class with data annotations
//! - **Java**: a JPA `@Entity` class
//! - **NodeJs**: a Mongoose schema and model
//!
//! Rendering never fails. An unknown technology or a missing selection
//! yields a fixed placeholder string instead.
//!

// ============================================================================
// Modules
// ============================================================================

pub mod context;
pub mod templates;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::PreviewContext;
pub use templates::{DotNetTemplate, JavaTemplate, MongooseTemplate, PreviewTemplate, template_for};

use studio_core::Technology;
use studio_ir::Entity;

/// Returned when the technology name matches no template
pub const UNSUPPORTED_TECHNOLOGY_PLACEHOLDER: &str =
    "// Code preview is not available for the selected technology.";

/// Returned when no entity is selected
pub const NO_SELECTION_PLACEHOLDER: &str = "// Select an entity to preview its generated code.";

// ============================================================================
// Rendering
// ============================================================================

/// Render the code preview for `selected` using the technology named `technology`.
///
/// `all` is the full entity list, used to resolve relationship and foreign key
/// targets. Names that no longer resolve render as `Unknown`.
pub fn render_preview(
    selected: Option<&Entity>,
    all: &[Entity],
    technology: &str,
    project_name: &str,
) -> String {
    let Some(technology) = Technology::parse(technology) else {
        tracing::debug!("No preview template for technology '{}'", technology);
        return UNSUPPORTED_TECHNOLOGY_PLACEHOLDER.to_string();
    };
    let Some(entity) = selected else {
        return NO_SELECTION_PLACEHOLDER.to_string();
    };
    render_preview_for(entity, all, technology, project_name)
}

/// Render with an already-resolved technology
pub fn render_preview_for(
    entity: &Entity,
    all: &[Entity],
    technology: Technology,
    project_name: &str,
) -> String {
    let ctx = PreviewContext::new(entity, all, project_name);
    let code = template_for(technology).render(&ctx);
    tracing::debug!(
        "Rendered {} preview for '{}' ({} bytes)",
        technology.display_name(),
        entity.name,
        code.len()
    );
    code
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================
