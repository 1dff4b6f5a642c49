//! Column definitions for entity properties
//!
//! This module contains the committed `Column` type and the `ColumnDraft`
//! used by the column editor before a column is accepted into an entity.

use serde::{Deserialize, Serialize};
use studio_core::{ColumnType, EntityId, StudioError, StudioResult, Validatable};

/// Name of the primary key column every new entity starts with
pub const DEFAULT_PRIMARY_KEY: &str = "Id";

/// Name of the display column every new entity starts with
pub const DEFAULT_NAME_COLUMN: &str = "Name";

// ============================================================================
// Column
// ============================================================================

/// A column of an entity (maps to a property in the generated model)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name, meaningful only within its entity
    pub name: String,

    /// Abstract data type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether a value is mandatory
    #[serde(default)]
    pub is_required: bool,

    /// Whether this column is (part of) the primary key
    #[serde(default)]
    pub is_primary_key: bool,

    /// Whether this column references another entity
    #[serde(default)]
    pub is_foreign_key: bool,

    /// Referenced entity when `is_foreign_key` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_entity: Option<EntityId>,
}

impl Column {
    /// Create a new optional column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_required: false,
            is_primary_key: false,
            is_foreign_key: false,
            referenced_entity: None,
        }
    }

    /// The default integer primary key column (`Id`)
    pub fn primary_key() -> Self {
        Self::new(DEFAULT_PRIMARY_KEY, ColumnType::Integer)
            .required()
            .as_primary_key()
    }

    /// The default required `Name` column
    pub fn name_column() -> Self {
        Self::new(DEFAULT_NAME_COLUMN, ColumnType::String).required()
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Mark the column as required
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark the column as the primary key
    pub fn as_primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as a foreign key to `entity`
    pub fn references(mut self, entity: EntityId) -> Self {
        self.is_foreign_key = true;
        self.referenced_entity = Some(entity);
        self
    }
}

impl Validatable for Column {
    fn validate(&self) -> StudioResult<()> {
        if self.name.trim().is_empty() {
            return Err(StudioError::validation("Column name cannot be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// ColumnDraft
// ============================================================================

/// Column editor state before it is accepted into an entity draft
///
/// The type starts unset; a draft without a name or a type is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,
    pub is_required: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub referenced_entity: Option<EntityId>,
}

impl ColumnDraft {
    /// Start a draft with a name and type
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type: Some(column_type),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn references(mut self, entity: EntityId) -> Self {
        self.is_foreign_key = true;
        self.referenced_entity = Some(entity);
        self
    }

    /// Whether the "add column" action should be enabled
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.column_type.is_some()
    }

    /// Accept the draft as a column
    ///
    /// The name is trimmed. A reference is only kept while the foreign key
    /// flag is set.
    pub fn into_column(self) -> StudioResult<Column> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(StudioError::validation("Column name is required"));
        }
        let column_type = self.column_type.ok_or_else(|| {
            StudioError::column_validation("", &name, "Column type is required")
        })?;

        Ok(Column {
            name,
            column_type,
            is_required: self.is_required,
            is_primary_key: self.is_primary_key,
            is_foreign_key: self.is_foreign_key,
            referenced_entity: if self.is_foreign_key {
                self.referenced_entity
            } else {
                None
            },
        })
    }
}

impl From<&Column> for ColumnDraft {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            column_type: Some(column.column_type),
            is_required: column.is_required,
            is_primary_key: column.is_primary_key,
            is_foreign_key: column.is_foreign_key,
            referenced_entity: column.referenced_entity,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
