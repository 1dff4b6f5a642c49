//! # Studio Core
//!
//! Core types, traits, and error handling for Scaffold Studio.
//!
//! This crate provides the foundational building blocks shared by the
//! entity store, the diagram engine, the code preview generator and the
//! wizard, including:
//!
//! - **Types**: Column types, relationship types, technologies, geometric
//!   primitives (Position, Size, Rect)
//! - **Traits**: `Validatable`
//! - **Errors**: Unified error handling with `StudioError` and `StudioResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{StudioError, StudioResult};
pub use traits::Validatable;
pub use types::{ColumnType, EntityId, Position, Rect, RelationType, Size, Technology};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
