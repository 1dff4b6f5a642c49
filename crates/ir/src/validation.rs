//! Model validation
//!
//! Whole-graph checks that go beyond the per-operation guards in the entity
//! editor: dangling references left by hand-edited model files, duplicate
//! pairs, and softer issues reported as warnings.

use crate::entity::Entity;
use std::collections::{HashMap, HashSet};
use studio_core::{EntityId, StudioError, StudioResult};

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed validation result with an error
    pub fn error(error: ValidationError) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to StudioResult (fails if any errors)
    pub fn to_result(self) -> StudioResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
                .join("; ");
            Err(StudioError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "entities.Order.columns.Total")
    pub path: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    // Entity errors
    EmptyEntityName,
    DuplicateEntityId,
    NoPrimaryKey,

    // Column errors
    EmptyColumnName,
    ForeignKeyMissingReference,
    ForeignKeyDanglingReference,

    // Relationship errors
    DanglingRelationship,
    ForeignOwner,
    DuplicateRelationship,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning code
    pub code: ValidationWarningCode,

    /// Human-readable warning message
    pub message: String,

    /// Path to the element
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    DuplicateEntityName,
    DuplicateColumnName,
    IsolatedEntity,
    NoEntities,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Validate the ordered entity list
    fn validate(&self, entities: &[Entity]) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Runs a set of validation rules over an entity graph
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with the built-in rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(EntityNamesRule));
        validator.add_rule(Box::new(EntityColumnsRule));
        validator.add_rule(Box::new(RelationshipsRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Validate with all rules
    pub fn validate(&self, entities: &[Entity]) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for rule in &self.rules {
            result.merge(rule.validate(entities));
        }
        result
    }
}

/// Validate an entity graph with the built-in rules
pub fn validate_entities(entities: &[Entity]) -> ValidationResult {
    Validator::with_default_rules().validate(entities)
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

fn entity_path(entity: &Entity) -> String {
    if entity.name.is_empty() {
        format!("entities.{}", entity.id)
    } else {
        format!("entities.{}", entity.name)
    }
}

/// Rule: entity names and identifiers
pub struct EntityNamesRule;

impl ValidationRule for EntityNamesRule {
    fn name(&self) -> &'static str {
        "entity_names"
    }

    fn validate(&self, entities: &[Entity]) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen_ids: HashSet<EntityId> = HashSet::new();
        let mut seen_names: HashSet<String> = HashSet::new();

        if entities.is_empty() {
            result.add_warning(ValidationWarning::new(
                ValidationWarningCode::NoEntities,
                "Model has no entities",
            ));
        }

        for entity in entities {
            if !seen_ids.insert(entity.id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateEntityId,
                        format!("Entity id {} is used more than once", entity.id),
                    )
                    .with_path(entity_path(entity)),
                );
            }

            if entity.name.trim().is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyEntityName,
                        "Entity name cannot be empty",
                    )
                    .with_path(entity_path(entity)),
                );
                continue;
            }

            // Names are not required to be unique, but generated code usually wants them to be
            if !seen_names.insert(entity.name.to_lowercase()) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::DuplicateEntityName,
                        format!("More than one entity is named '{}'", entity.name),
                    )
                    .with_path(entity_path(entity)),
                );
            }
        }

        result
    }
}

/// Rule: columns, primary keys and foreign key references
pub struct EntityColumnsRule;

impl ValidationRule for EntityColumnsRule {
    fn name(&self) -> &'static str {
        "entity_columns"
    }

    fn validate(&self, entities: &[Entity]) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let known: HashSet<EntityId> = entities.iter().map(|e| e.id).collect();

        for entity in entities {
            let path = entity_path(entity);

            if !entity.has_primary_key() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::NoPrimaryKey,
                        format!("Entity '{}' has no primary key", entity.name),
                    )
                    .with_path(&path),
                );
            }

            let mut seen: HashSet<String> = HashSet::new();
            for (index, column) in entity.columns.iter().enumerate() {
                if column.name.trim().is_empty() {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::EmptyColumnName,
                            "Column name cannot be empty",
                        )
                        .with_path(format!("{}.columns[{}]", path, index)),
                    );
                    continue;
                }
                let column_path = format!("{}.columns.{}", path, column.name);

                if !seen.insert(column.name.to_lowercase()) {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::DuplicateColumnName,
                            format!("Duplicate column name: '{}'", column.name),
                        )
                        .with_path(&column_path),
                    );
                }

                if column.is_foreign_key {
                    match column.referenced_entity {
                        None => result.add_error(
                            ValidationError::new(
                                ValidationErrorCode::ForeignKeyMissingReference,
                                format!("Foreign key '{}' has no reference", column.name),
                            )
                            .with_path(&column_path),
                        ),
                        Some(target) if !known.contains(&target) => result.add_error(
                            ValidationError::new(
                                ValidationErrorCode::ForeignKeyDanglingReference,
                                format!(
                                    "Foreign key '{}' references a missing entity",
                                    column.name
                                ),
                            )
                            .with_path(&column_path),
                        ),
                        Some(_) => {}
                    }
                }
            }
        }

        result
    }
}

/// Rule: relationship endpoints, ownership and uniqueness
pub struct RelationshipsRule;

impl ValidationRule for RelationshipsRule {
    fn name(&self) -> &'static str {
        "relationships"
    }

    fn validate(&self, entities: &[Entity]) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let names: HashMap<EntityId, &str> =
            entities.iter().map(|e| (e.id, e.name.as_str())).collect();
        let mut connected: HashSet<EntityId> = HashSet::new();

        for entity in entities {
            let path = entity_path(entity);
            let mut targets: HashSet<EntityId> = HashSet::new();

            for relationship in &entity.relationships {
                if relationship.from_entity != entity.id {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::ForeignOwner,
                            format!(
                                "Relationship stored on '{}' is owned by another entity",
                                entity.name
                            ),
                        )
                        .with_path(format!("{}.relationships", path)),
                    );
                }

                match names.get(&relationship.to_entity) {
                    Some(target) => {
                        connected.insert(entity.id);
                        connected.insert(relationship.to_entity);
                        if !targets.insert(relationship.to_entity) {
                            result.add_error(
                                ValidationError::new(
                                    ValidationErrorCode::DuplicateRelationship,
                                    format!(
                                        "'{}' has more than one relationship to '{}'",
                                        entity.name, target
                                    ),
                                )
                                .with_path(format!("{}.relationships.{}", path, target)),
                            );
                        }
                    }
                    None => result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::DanglingRelationship,
                            format!(
                                "Relationship from '{}' references a missing entity",
                                entity.name
                            ),
                        )
                        .with_path(format!("{}.relationships", path)),
                    ),
                }
            }
        }

        if entities.len() > 1 {
            for entity in entities.iter().filter(|e| !connected.contains(&e.id)) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::IsolatedEntity,
                        format!("Entity '{}' has no relationships", entity.name),
                    )
                    .with_path(entity_path(entity)),
                );
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
