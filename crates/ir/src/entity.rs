//! Entity definitions for data models
//!
//! An `Entity` doubles as the editable draft: the editor works on an owned
//! copy and hands it back to the store through `EntityStore::save_entity`.
//! Every draft operation here is atomic; a rejected edit leaves the draft
//! exactly as it was.

use crate::column::{Column, ColumnDraft};
use crate::relationship::{Relationship, RelationshipDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studio_core::{EntityId, StudioError, StudioResult, Validatable};
use uuid::Uuid;

// ============================================================================
// Entity
// ============================================================================

/// A data entity with its columns and outgoing relationships
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique, time-ordered identifier
    pub id: EntityId,

    /// Display name (not required to be unique)
    pub name: String,

    /// Ordered columns
    pub columns: Vec<Column>,

    /// Outgoing relationships, owned by this entity
    pub relationships: Vec<Relationship>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl Entity {
    /// Create a new entity with the default `Id` and `Name` columns
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            columns: vec![Column::primary_key(), Column::name_column()],
            relationships: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Create an unnamed draft as offered by the "new entity" action
    pub fn new_draft() -> Self {
        Self::new("")
    }

    /// Rebuild an entity from its parts, keeping the given identifier
    pub fn from_parts(
        id: EntityId,
        name: impl Into<String>,
        columns: Vec<Column>,
        relationships: Vec<Relationship>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            columns,
            relationships,
            created_at: now,
            modified_at: now,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add a column using builder pattern
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a relationship using builder pattern, bypassing duplicate checks
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Rename the entity
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    // ========================================================================
    // Column management
    // ========================================================================

    /// Append a column from the column editor
    ///
    /// Returns the index of the new column. Rejected when the draft has no
    /// name or no type.
    pub fn add_column(&mut self, draft: ColumnDraft) -> StudioResult<usize> {
        let column = draft
            .into_column()
            .map_err(|e| self.column_error(e))?;
        self.columns.push(column);
        self.touch();
        Ok(self.columns.len() - 1)
    }

    /// Replace the column at `index`
    ///
    /// Same checks as [`Entity::add_column`]; additionally rejected when the
    /// edit would leave the entity without a primary key.
    pub fn update_column(&mut self, index: usize, draft: ColumnDraft) -> StudioResult<()> {
        self.check_index(index)?;
        let column = draft
            .into_column()
            .map_err(|e| self.column_error(e))?;

        let other_keys = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != index && c.is_primary_key)
            .count();
        if !column.is_primary_key && other_keys == 0 {
            return Err(StudioError::LastPrimaryKey {
                entity: self.name.clone(),
            });
        }

        self.columns[index] = column;
        self.touch();
        Ok(())
    }

    /// Remove the column at `index`; primary key columns cannot be removed
    pub fn delete_column(&mut self, index: usize) -> StudioResult<Column> {
        self.check_index(index)?;
        if self.columns[index].is_primary_key {
            return Err(StudioError::PrimaryKeyColumn {
                column: self.columns[index].name.clone(),
            });
        }
        self.touch();
        Ok(self.columns.remove(index))
    }

    /// Whether the delete control for the column at `index` is enabled
    pub fn can_delete_column(&self, index: usize) -> bool {
        self.columns
            .get(index)
            .map(|c| !c.is_primary_key)
            .unwrap_or(false)
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the first primary key column
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    /// Check whether the entity has at least one primary key column
    pub fn has_primary_key(&self) -> bool {
        self.primary_key().is_some()
    }

    /// Get all foreign key columns
    pub fn foreign_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_foreign_key).collect()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    // ========================================================================
    // Relationship management
    // ========================================================================

    /// Add an outgoing relationship
    ///
    /// Rejected when a relationship to the same target already exists.
    pub fn add_relationship(&mut self, draft: RelationshipDraft) -> StudioResult<()> {
        if self.relationship_to(draft.to_entity).is_some() {
            return Err(StudioError::DuplicateRelationship {
                from: self.id,
                to: draft.to_entity,
            });
        }
        let relationship = draft.into_relationship(self.id);
        self.relationships.push(relationship);
        self.touch();
        Ok(())
    }

    /// Remove the outgoing relationship to `to_entity`
    pub fn remove_relationship(&mut self, to_entity: EntityId) -> Option<Relationship> {
        let pos = self
            .relationships
            .iter()
            .position(|r| r.to_entity == to_entity)?;
        self.touch();
        Some(self.relationships.remove(pos))
    }

    /// Get the outgoing relationship to `to_entity`
    pub fn relationship_to(&self, to_entity: EntityId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.to_entity == to_entity)
    }

    /// Drop every relationship that touches `entity_id`; returns how many
    pub fn remove_relationships_involving(&mut self, entity_id: EntityId) -> usize {
        let before = self.relationships.len();
        self.relationships.retain(|r| !r.involves_entity(entity_id));
        let removed = before - self.relationships.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Turn foreign-key columns that reference `entity_id` back into plain
    /// columns; returns how many
    pub fn clear_references_to(&mut self, entity_id: EntityId) -> usize {
        let mut cleared = 0;
        for column in &mut self.columns {
            if column.referenced_entity == Some(entity_id) {
                column.is_foreign_key = false;
                column.referenced_entity = None;
                cleared += 1;
            }
        }
        if cleared > 0 {
            self.touch();
        }
        cleared
    }

    /// Drop relationships and foreign keys that point at a deleted entity
    pub fn detach_entity(&mut self, entity_id: EntityId) -> usize {
        self.remove_relationships_involving(entity_id) + self.clear_references_to(entity_id)
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    fn check_index(&self, index: usize) -> StudioResult<()> {
        if index >= self.columns.len() {
            return Err(StudioError::ColumnIndexOutOfRange {
                index,
                len: self.columns.len(),
            });
        }
        Ok(())
    }

    fn column_error(&self, err: StudioError) -> StudioError {
        match err {
            StudioError::ColumnValidation {
                column, message, ..
            } => StudioError::column_validation(&self.name, column, message),
            other => other,
        }
    }
}

impl Validatable for Entity {
    fn validate(&self) -> StudioResult<()> {
        if self.name.trim().is_empty() {
            return Err(StudioError::entity_validation(
                &self.name,
                "Entity name cannot be empty",
            ));
        }

        if !self.has_primary_key() {
            return Err(StudioError::entity_validation(
                &self.name,
                "Entity must have a primary key",
            ));
        }

        for column in &self.columns {
            column.validate().map_err(|e| {
                StudioError::column_validation(&self.name, &column.name, e.to_string())
            })?;
        }

        Ok(())
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new_draft()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
