//! Error types for Scaffold Studio
//!
//! This module provides unified error handling across the workspace:
//! validation rejections raised by the entity editor, lookup failures,
//! configuration problems and IO/serialization errors from the CLI edge.

use crate::types::EntityId;
use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a second relationship between the same pair is added.
pub const DUPLICATE_RELATIONSHIP_MESSAGE: &str =
    "a relationship already exists between these entities";

/// The main error type for Scaffold Studio
#[derive(Debug, Error)]
pub enum StudioError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity validation failed
    #[error("Entity validation failed for '{entity}': {message}")]
    EntityValidation { entity: String, message: String },

    /// Column validation failed
    #[error("Column validation failed for '{entity}.{column}': {message}")]
    ColumnValidation {
        entity: String,
        column: String,
        message: String,
    },

    /// Relationship validation failed
    #[error("Relationship validation failed: {0}")]
    RelationshipValidation(String),

    /// A relationship between the same ordered pair already exists
    #[error("{}", DUPLICATE_RELATIONSHIP_MESSAGE)]
    DuplicateRelationship { from: EntityId, to: EntityId },

    /// Attempt to delete a primary key column
    #[error("Primary key column '{column}' cannot be deleted")]
    PrimaryKeyColumn { column: String },

    /// Edit would leave the entity without a primary key
    #[error("Entity '{entity}' must keep at least one primary key column")]
    LastPrimaryKey { entity: String },

    /// Column index does not exist on the entity
    #[error("Column index {index} is out of range (entity has {len} columns)")]
    ColumnIndexOutOfRange { index: usize, len: usize },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Entity not found
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// No entity draft is open for editing
    #[error("No entity is currently being edited")]
    NoActiveDraft,

    /// Technology name does not match a supported template
    #[error("Unsupported technology: {0}")]
    UnsupportedTechnology(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// TOML configuration parse error
    #[error("Invalid configuration file: {0}")]
    TomlParse(#[from] toml::de::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StudioError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        StudioError::Validation(msg.into())
    }

    /// Create an entity validation error
    pub fn entity_validation(entity: impl Into<String>, msg: impl Into<String>) -> Self {
        StudioError::EntityValidation {
            entity: entity.into(),
            message: msg.into(),
        }
    }

    /// Create a column validation error
    pub fn column_validation(
        entity: impl Into<String>,
        column: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        StudioError::ColumnValidation {
            entity: entity.into(),
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation rejection
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StudioError::Validation(_)
                | StudioError::EntityValidation { .. }
                | StudioError::ColumnValidation { .. }
                | StudioError::RelationshipValidation(_)
                | StudioError::DuplicateRelationship { .. }
                | StudioError::PrimaryKeyColumn { .. }
                | StudioError::LastPrimaryKey { .. }
                | StudioError::ColumnIndexOutOfRange { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StudioError::EntityNotFound(_) | StudioError::NoActiveDraft
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StudioError::FileRead { .. } | StudioError::FileWrite { .. }
        )
    }
}

/// Result type alias using StudioError
pub type StudioResult<T> = Result<T, StudioError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error() {
        let err = StudioError::validation("Column name is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Column name is required");
    }

    #[test]
    fn test_entity_validation_error() {
        let err = StudioError::entity_validation("Product", "Entity name cannot be empty");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Entity validation failed for 'Product': Entity name cannot be empty"
        );
    }

    #[test]
    fn test_column_validation_error() {
        let err = StudioError::column_validation("Product", "Price", "Type is required");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Column validation failed for 'Product.Price': Type is required"
        );
    }

    #[test]
    fn test_duplicate_relationship_message() {
        let err = StudioError::DuplicateRelationship {
            from: uuid::Uuid::nil(),
            to: uuid::Uuid::nil(),
        };
        assert!(err.is_validation());
        assert_eq!(err.to_string(), DUPLICATE_RELATIONSHIP_MESSAGE);
    }

    #[test]
    fn test_primary_key_errors() {
        let err = StudioError::PrimaryKeyColumn {
            column: "Id".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Primary key column 'Id' cannot be deleted");

        let err = StudioError::LastPrimaryKey {
            entity: "Order".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Entity 'Order' must keep at least one primary key column"
        );
    }

    #[test]
    fn test_not_found_errors() {
        let err = StudioError::EntityNotFound("Customer".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Entity not found: Customer");
        assert!(StudioError::NoActiveDraft.is_not_found());
    }


    #[test]
    fn test_io_error_classification() {
        let err = StudioError::FileRead {
            path: PathBuf::from("model.json"),
            message: "file not found".to_string(),
        };
        assert!(err.is_io());
        assert_eq!(
            err.to_string(),
            "Failed to read file 'model.json': file not found"
        );
    }
}
