//! Relationship definitions between entities
//!
//! A relationship is owned by its `from_entity` and stored on that entity.
//! At most one relationship exists per ordered (from, to) pair.

use crate::column::DEFAULT_PRIMARY_KEY;
use serde::{Deserialize, Serialize};
use studio_core::{EntityId, RelationType};

/// Display name for a relationship target that no longer resolves
pub const UNKNOWN_TARGET: &str = "Unknown";

// ============================================================================
// Relationship
// ============================================================================

/// A directed relationship between two entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Kind of relationship
    #[serde(rename = "type")]
    pub relation_type: RelationType,

    /// Owning entity
    pub from_entity: EntityId,

    /// Target entity
    pub to_entity: EntityId,

    /// Column on the owning side
    pub from_column: String,

    /// Column on the target side
    pub to_column: String,
}

impl Relationship {
    /// Create a relationship joining the two primary keys
    pub fn new(from_entity: EntityId, to_entity: EntityId, relation_type: RelationType) -> Self {
        Self {
            relation_type,
            from_entity,
            to_entity,
            from_column: DEFAULT_PRIMARY_KEY.to_string(),
            to_column: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    /// Set the owning-side column
    pub fn with_from_column(mut self, column: impl Into<String>) -> Self {
        self.from_column = column.into();
        self
    }

    /// Set the target-side column
    pub fn with_to_column(mut self, column: impl Into<String>) -> Self {
        self.to_column = column.into();
        self
    }

    /// Check if this relationship touches the given entity on either side
    pub fn involves_entity(&self, entity_id: EntityId) -> bool {
        self.from_entity == entity_id || self.to_entity == entity_id
    }

    /// Get the entity on the other side, if `entity_id` is an endpoint
    pub fn other_entity(&self, entity_id: EntityId) -> Option<EntityId> {
        if self.from_entity == entity_id {
            Some(self.to_entity)
        } else if self.to_entity == entity_id {
            Some(self.from_entity)
        } else {
            None
        }
    }

    /// Whether both ends are the same entity
    pub fn is_self_referential(&self) -> bool {
        self.from_entity == self.to_entity
    }
}

// ============================================================================
// RelationshipDraft
// ============================================================================

/// Relationship editor state; the owner is the entity it gets added to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDraft {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub to_entity: EntityId,
    #[serde(default)]
    pub from_column: Option<String>,
    #[serde(default)]
    pub to_column: Option<String>,
}

impl RelationshipDraft {
    pub fn new(to_entity: EntityId, relation_type: RelationType) -> Self {
        Self {
            relation_type,
            to_entity,
            from_column: None,
            to_column: None,
        }
    }

    pub fn with_from_column(mut self, column: impl Into<String>) -> Self {
        self.from_column = Some(column.into());
        self
    }

    pub fn with_to_column(mut self, column: impl Into<String>) -> Self {
        self.to_column = Some(column.into());
        self
    }

    /// Resolve into a relationship owned by `from_entity`
    ///
    /// Blank or missing columns fall back to `Id`.
    pub fn into_relationship(self, from_entity: EntityId) -> Relationship {
        fn column_or_default(column: Option<String>) -> String {
            column
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_string())
        }

        Relationship {
            relation_type: self.relation_type,
            from_entity,
            to_entity: self.to_entity,
            from_column: column_or_default(self.from_column),
            to_column: column_or_default(self.to_column),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
