//! Generation snapshots
//!
//! The generation trigger receives the wizard selections plus a faithful copy
//! of the entity graph. This module defines that wire shape (camelCase JSON),
//! converts between it and the store, and reads/writes it from disk for the
//! command-line tools.

use crate::column::Column;
use crate::entity::Entity;
use crate::relationship::Relationship;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use studio_core::{EntityId, StudioError, StudioResult};

// ============================================================================
// Wire types
// ============================================================================

/// One entity as sent to the generation trigger, without editor-only state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl From<&Entity> for EntitySnapshot {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            columns: entity.columns.clone(),
            relationships: entity.relationships.clone(),
        }
    }
}

impl From<EntitySnapshot> for Entity {
    fn from(snapshot: EntitySnapshot) -> Self {
        Entity::from_parts(
            snapshot.id,
            snapshot.name,
            snapshot.columns,
            snapshot.relationships,
        )
    }
}

/// Payload for `POST /api/generate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub design_pattern: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub connection_string: String,
    #[serde(default)]
    pub entities: Vec<EntitySnapshot>,
}

impl GenerationRequest {
    /// Create a request for the given project with no entities
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.project_description = description.into();
        self
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    pub fn with_design_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.design_pattern = pattern.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = connection_string.into();
        self
    }

    /// Copy every committed entity, in store order
    pub fn with_entities_from(mut self, store: &EntityStore) -> Self {
        self.entities = snapshot_entities(store.entities());
        self
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Rehydrate the snapshot entities
    pub fn to_entities(&self) -> Vec<Entity> {
        self.entities.iter().cloned().map(Entity::from).collect()
    }

    /// Rehydrate the snapshot into a store, preserving order
    pub fn to_store(&self) -> EntityStore {
        EntityStore::from_entities(self.to_entities())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> StudioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> StudioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Snapshot a slice of entities for the generation trigger
pub fn snapshot_entities(entities: &[Entity]) -> Vec<EntitySnapshot> {
    entities.iter().map(EntitySnapshot::from).collect()
}

// ============================================================================
// File IO
// ============================================================================

/// Load a generation request from a JSON file
pub fn load_request(path: impl AsRef<Path>) -> StudioResult<GenerationRequest> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| StudioError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    GenerationRequest::from_json(&json).map_err(|e| match e {
        StudioError::JsonSerialization(je) => StudioError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid model file format: {}", je),
        },
        other => other,
    })
}

/// Save a generation request as pretty JSON, creating parent directories
pub fn save_request(request: &GenerationRequest, path: impl AsRef<Path>) -> StudioResult<()> {
    let path = path.as_ref();
    let json = request.to_json()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| StudioError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| StudioError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnDraft, RelationshipDraft};
    use studio_core::{ColumnType, RelationType};
    use tempfile::TempDir;

    fn sample_store() -> EntityStore {
        let mut store = EntityStore::new();

        let mut customer = store.create_entity();
        customer.rename("Customer");
        customer
            .add_column(ColumnDraft::new("Email", ColumnType::String).required())
            .unwrap();

        let mut order = store.create_entity();
        order.rename("Order");
        order
            .add_column(ColumnDraft::new("PlacedAt", ColumnType::DateTime))
            .unwrap();
        order
            .add_column(
                ColumnDraft::new("CustomerId", ColumnType::Integer).references(customer.id),
            )
            .unwrap();
        order
            .add_relationship(
                RelationshipDraft::new(customer.id, RelationType::ManyToOne)
                    .with_from_column("CustomerId"),
            )
            .unwrap();
        customer
            .add_relationship(RelationshipDraft::new(order.id, RelationType::OneToMany))
            .unwrap();

        store.save_entity(customer).unwrap();
        store.save_entity(order).unwrap();
        store
    }

    #[test]
    fn test_round_trip_preserves_columns_and_relationships() {
        let store = sample_store();
        let request = GenerationRequest::new("Shop")
            .with_technology("DotNet")
            .with_entities_from(&store);

        let json = request.to_json().unwrap();
        let restored = GenerationRequest::from_json(&json).unwrap().to_store();

        assert_eq!(restored.len(), store.len());
        for (original, copy) in store.entities().iter().zip(restored.entities()) {
            assert_eq!(original.id, copy.id);
            assert_eq!(original.name, copy.name);
            assert_eq!(original.columns, copy.columns);
            assert_eq!(original.relationships, copy.relationships);
        }
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let request = GenerationRequest::new("Shop")
            .with_design_pattern("Repository")
            .with_connection_string("Server=.;")
            .with_entities_from(&sample_store());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["projectName"], "Shop");
        assert_eq!(value["designPattern"], "Repository");
        assert_eq!(value["connectionString"], "Server=.;");
        assert_eq!(value["entities"][1]["relationships"][0]["fromColumn"], "CustomerId");
        assert_eq!(value["entities"][1]["columns"][3]["isForeignKey"], true);
    }

    #[test]
    fn test_minimal_request_parses() {
        let request = GenerationRequest::from_json(r#"{"projectName":"Empty"}"#).unwrap();
        assert_eq!(request.project_name, "Empty");
        assert!(request.entities.is_empty());
    }

    #[test]
    fn test_save_and_load_request() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("model.json");

        let request = GenerationRequest::new("Shop").with_entities_from(&sample_store());
        save_request(&request, &path).unwrap();

        let loaded = load_request(&path).unwrap();
        assert_eq!(loaded, request);
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_request(&path).unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("Invalid model file format"));

        assert!(load_request(temp_dir.path().join("missing.json")).is_err());
    }
}
