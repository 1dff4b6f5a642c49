//! # Studio IR
//!
//! The entity graph behind the Scaffold Studio editor.
//!
//! ## Core Concepts
//!
//! - **Entity**: A data model with ordered columns and outgoing relationships
//! - **Column**: A typed property of an entity (primary/foreign key flags)
//! - **Relationship**: A directed link owned by its source entity
//! - **EntityStore**: The ordered set of committed entities for one session
//! - **GenerationRequest**: The snapshot sent to the generation service
//!

pub mod column;
pub mod entity;
pub mod relationship;
pub mod snapshot;
pub mod store;
pub mod validation;

// Re-export commonly used types at crate root
pub use column::{Column, ColumnDraft, DEFAULT_NAME_COLUMN, DEFAULT_PRIMARY_KEY};
pub use entity::Entity;
pub use relationship::{Relationship, RelationshipDraft, UNKNOWN_TARGET};
pub use snapshot::{
    EntitySnapshot, GenerationRequest, load_request, save_request, snapshot_entities,
};
pub use store::EntityStore;
pub use validation::{
    ValidationError, ValidationErrorCode, ValidationResult, ValidationRule, ValidationWarning,
    ValidationWarningCode, Validator, validate_entities,
};

// Re-export core types that are commonly used with the entity graph
pub use studio_core::{
    ColumnType, EntityId, RelationType, StudioError, StudioResult, Technology, Validatable,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        Column, ColumnDraft, ColumnType, Entity, EntityId, EntityStore, GenerationRequest,
        RelationType, Relationship, RelationshipDraft, StudioError, StudioResult, Validatable,
    };
}
