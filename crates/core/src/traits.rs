//! Core traits for Scaffold Studio
//!
//! This module defines the behaviors shared by the model types: entities,
//! columns and generation snapshots all check their own consistency through
//! [`Validatable`] before they are committed or sent anywhere.

use crate::error::StudioResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use studio_core::{Validatable, StudioResult, StudioError};
///
/// struct Draft {
///     name: String,
/// }
///
/// impl Validatable for Draft {
///     fn validate(&self) -> StudioResult<()> {
///         if self.name.is_empty() {
///             return Err(StudioError::validation("Name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `StudioError` describing the problem.
    fn validate(&self) -> StudioResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudioError;

    struct TestValidatable {
        valid: bool,
    }

    impl Validatable for TestValidatable {
        fn validate(&self) -> StudioResult<()> {
            if self.valid {
                Ok(())
            } else {
                Err(StudioError::validation("Invalid state"))
            }
        }
    }

    #[test]
    fn test_validatable_trait() {
        let valid = TestValidatable { valid: true };
        assert!(valid.is_valid());
        assert!(valid.validation_errors().is_empty());

        let invalid = TestValidatable { valid: false };
        assert!(!invalid.is_valid());
        assert_eq!(
            invalid.validation_errors(),
            vec!["Validation error: Invalid state".to_string()]
        );
    }
}
