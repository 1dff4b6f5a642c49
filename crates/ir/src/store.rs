//! The entity graph store
//!
//! `EntityStore` is the single source of truth for the committed entities of
//! one wizard session. It keeps entities in insertion order, which is the
//! order the diagram layout and the generation snapshot follow.

use crate::entity::Entity;
use studio_core::{EntityId, StudioResult, Validatable};

// ============================================================================
// EntityStore
// ============================================================================

/// Ordered, in-memory collection of committed entities plus the preview selection
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    selected: Option<EntityId>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from already committed entities, keeping their order
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            selected: None,
        }
    }

    // ========================================================================
    // Entity lifecycle
    // ========================================================================

    /// Allocate a fresh draft; it is not part of the store until saved
    pub fn create_entity(&self) -> Entity {
        let draft = Entity::new_draft();
        tracing::debug!(id = %draft.id, "Created entity draft");
        draft
    }

    /// Commit a draft
    ///
    /// Replaces the entity with the same id in place, or appends it. The
    /// saved entity becomes the selection. A draft that fails validation is
    /// rejected and the store is left untouched.
    pub fn save_entity(&mut self, mut draft: Entity) -> StudioResult<EntityId> {
        if let Err(err) = draft.validate() {
            tracing::warn!(id = %draft.id, "Rejected entity save: {}", err);
            return Err(err);
        }

        draft.touch();
        let id = draft.id;
        match self.position_of(id) {
            Some(index) => {
                tracing::debug!(%id, name = %draft.name, "Updated entity");
                self.entities[index] = draft;
            }
            None => {
                tracing::debug!(%id, name = %draft.name, "Added entity");
                self.entities.push(draft);
            }
        }
        self.selected = Some(id);
        Ok(id)
    }

    /// Remove an entity along with every relationship and foreign key that
    /// references it
    ///
    /// Deleting an id that is not present is a no-op.
    pub fn delete_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.position_of(id)?;
        let removed = self.entities.remove(index);

        let cascaded: usize = self
            .entities
            .iter_mut()
            .map(|e| e.detach_entity(id))
            .sum();

        if self.selected == Some(id) {
            self.selected = None;
        }

        tracing::debug!(%id, name = %removed.name, cascaded, "Deleted entity");
        Some(removed)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Record which entity the code preview shows
    pub fn select_entity(&mut self, id: Option<EntityId>) {
        self.selected = id;
    }

    /// Currently selected id
    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Currently selected entity, if it is still in the store
    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selected.and_then(|id| self.get(id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get an entity by ID
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Committed entities in order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Check whether an entity with this id is committed
    pub fn contains(&self, id: EntityId) -> bool {
        self.position_of(id).is_some()
    }

    /// Get the number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the store has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of relationships across all entities
    pub fn relationship_count(&self) -> usize {
        self.entities.iter().map(|e| e.relationships.len()).sum()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.entities.clear();
        self.selected = None;
    }

    fn position_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }
}

// ============================================================================
// Tests
// ============================================================================
