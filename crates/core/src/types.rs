//! Core types used throughout Scaffold Studio
//!
//! This module contains the fundamental types shared by the entity store,
//! the diagram engine and the code preview templates.

use crate::error::StudioError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Type alias for entity identifiers
pub type EntityId = uuid::Uuid;

// ============================================================================
// Geometry Types
// ============================================================================

/// Position on the 2D diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Midpoint between two positions
    pub fn midpoint(&self, other: &Position) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

/// Size of a box on the diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Bounding rectangle for entity boxes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from coordinates and dimensions
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Left edge x coordinate
    pub fn left(&self) -> f32 {
        self.position.x
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.position.y
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    /// Check if a point is contained within this rectangle
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Position {
        Position {
            x: self.position.x + self.size.width / 2.0,
            y: self.position.y + self.size.height / 2.0,
        }
    }
}

// ============================================================================
// Column Types
// ============================================================================

/// Abstract column types offered by the entity editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColumnType {
    /// Text value
    #[default]
    #[serde(rename = "string")]
    String,
    /// Whole number
    #[serde(rename = "int", alias = "integer")]
    Integer,
    /// Exact decimal number
    #[serde(rename = "decimal")]
    Decimal,
    /// True/false flag
    #[serde(rename = "bool", alias = "boolean")]
    Boolean,
    /// Date and time
    #[serde(rename = "datetime")]
    DateTime,
    /// Globally unique identifier
    #[serde(rename = "guid", alias = "uuid")]
    Guid,
}

impl ColumnType {
    /// Wire name used in snapshots (`"int"`, `"decimal"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "int",
            ColumnType::Decimal => "decimal",
            ColumnType::Boolean => "bool",
            ColumnType::DateTime => "datetime",
            ColumnType::Guid => "guid",
        }
    }

    /// Get a user-friendly display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Integer => "Integer",
            ColumnType::Decimal => "Decimal",
            ColumnType::Boolean => "Boolean",
            ColumnType::DateTime => "DateTime",
            ColumnType::Guid => "GUID",
        }
    }

    /// Whether values of this type are numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Decimal)
    }

    /// Get all column types in editor order
    pub fn all() -> &'static [ColumnType] {
        &[
            ColumnType::String,
            ColumnType::Integer,
            ColumnType::Decimal,
            ColumnType::Boolean,
            ColumnType::DateTime,
            ColumnType::Guid,
        ]
    }
}

impl FromStr for ColumnType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(ColumnType::String),
            "int" | "integer" => Ok(ColumnType::Integer),
            "decimal" => Ok(ColumnType::Decimal),
            "bool" | "boolean" => Ok(ColumnType::Boolean),
            "datetime" => Ok(ColumnType::DateTime),
            "guid" | "uuid" => Ok(ColumnType::Guid),
            other => Err(StudioError::validation(format!(
                "Unknown column type '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Relationship Types
// ============================================================================

/// Entity relationship types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RelationType {
    /// One record relates to many others (e.g., Customer has many Orders)
    #[default]
    #[serde(alias = "one-to-many")]
    OneToMany,
    /// Many records relate to one (inverse of OneToMany)
    #[serde(alias = "many-to-one")]
    ManyToOne,
    /// Many records relate to many others
    #[serde(alias = "many-to-many")]
    ManyToMany,
    /// One record relates to exactly one other record
    #[serde(alias = "one-to-one")]
    OneToOne,
}

impl RelationType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationType::OneToMany => "One to Many",
            RelationType::ManyToOne => "Many to One",
            RelationType::ManyToMany => "Many to Many",
            RelationType::OneToOne => "One to One",
        }
    }

    /// Short cardinality label for diagram connectors
    pub fn label(&self) -> &'static str {
        match self {
            RelationType::OneToMany => "1:N",
            RelationType::ManyToOne => "N:1",
            RelationType::ManyToMany => "N:M",
            RelationType::OneToOne => "1:1",
        }
    }

    /// Whether the owning side holds a collection of the related entity
    pub fn is_collection(&self) -> bool {
        matches!(self, RelationType::OneToMany | RelationType::ManyToMany)
    }

    /// Get the inverse relationship type
    pub fn inverse(&self) -> Self {
        match self {
            RelationType::OneToOne => RelationType::OneToOne,
            RelationType::OneToMany => RelationType::ManyToOne,
            RelationType::ManyToOne => RelationType::OneToMany,
            RelationType::ManyToMany => RelationType::ManyToMany,
        }
    }

    /// Get all relationship types
    pub fn all() -> &'static [RelationType] {
        &[
            RelationType::OneToMany,
            RelationType::ManyToOne,
            RelationType::ManyToMany,
            RelationType::OneToOne,
        ]
    }
}

impl FromStr for RelationType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "onetomany" => Ok(RelationType::OneToMany),
            "manytoone" => Ok(RelationType::ManyToOne),
            "manytomany" => Ok(RelationType::ManyToMany),
            "onetoone" => Ok(RelationType::OneToOne),
            _ => Err(StudioError::validation(format!(
                "Unknown relationship type '{}'",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Technologies
// ============================================================================

/// Technology stacks with a code preview template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    /// ASP.NET Core with Entity Framework Core
    DotNet,
    /// Spring Boot with JPA
    Java,
    /// Node.js with Mongoose
    NodeJs,
}

impl Technology {
    /// Resolve an opaque technology name as offered by the options provider.
    ///
    /// Matching is case-insensitive and accepts the common spellings of
    /// each stack. Returns `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dotnet" | ".net" | "net" | "csharp" | "c#" | "asp.net core" | "aspnetcore" => {
                Some(Technology::DotNet)
            }
            "java" | "spring" | "springboot" | "spring boot" => Some(Technology::Java),
            "nodejs" | "node.js" | "node" | "express" => Some(Technology::NodeJs),
            _ => None,
        }
    }

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Technology::DotNet => "DotNet",
            Technology::Java => "Java",
            Technology::NodeJs => "NodeJs",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Technology::DotNet => ".NET (Entity Framework Core)",
            Technology::Java => "Java (Spring Boot / JPA)",
            Technology::NodeJs => "Node.js (Mongoose)",
        }
    }

    /// Language of the rendered preview
    pub fn language(&self) -> &'static str {
        match self {
            Technology::DotNet => "csharp",
            Technology::Java => "java",
            Technology::NodeJs => "javascript",
        }
    }

    /// Get all supported technologies
    pub fn all() -> &'static [Technology] {
        &[Technology::DotNet, Technology::Java, Technology::NodeJs]
    }
}

impl FromStr for Technology {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Technology::parse(s).ok_or_else(|| StudioError::UnsupportedTechnology(s.to_string()))
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Position tests
    #[test]
    fn test_position_offset() {
        let pos = Position::new(10.0, 20.0);
        let new_pos = pos.offset(5.0, -10.0);
        assert_eq!(new_pos.x, 15.0);
        assert_eq!(new_pos.y, 10.0);
    }

    #[test]
    fn test_position_midpoint() {
        let mid = Position::new(0.0, 0.0).midpoint(&Position::new(10.0, 20.0));
        assert_eq!(mid, Position::new(5.0, 10.0));
    }

    // Rect tests
    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::from_xywh(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Position::new(50.0, 30.0)));
        assert!(!rect.contains(Position::new(5.0, 30.0)));
        assert!(!rect.contains(Position::new(150.0, 30.0)));
    }

    #[test]
    fn test_rect_center() {
        let center = Rect::from_xywh(0.0, 0.0, 100.0, 50.0).center();
        assert_eq!(center, Position::new(50.0, 25.0));
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::from_xywh(0.0, 0.0, 50.0, 50.0);
        let r2 = Rect::from_xywh(25.0, 25.0, 50.0, 50.0);
        let r3 = Rect::from_xywh(100.0, 100.0, 50.0, 50.0);
        assert!(r1.intersects(&r2));
        assert!(!r1.intersects(&r3));
    }

    // ColumnType tests
    #[test]
    fn test_column_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&ColumnType::Integer).unwrap(),
            "\"int\""
        );
        assert_eq!(
            serde_json::from_str::<ColumnType>("\"integer\"").unwrap(),
            ColumnType::Integer
        );
        assert_eq!(
            serde_json::from_str::<ColumnType>("\"decimal\"").unwrap(),
            ColumnType::Decimal
        );
        for ty in ColumnType::all() {
            assert_eq!(ty.as_str().parse::<ColumnType>().unwrap(), *ty);
        }
    }

    #[test]
    fn test_column_type_unknown() {
        assert!("money".parse::<ColumnType>().is_err());
    }

    // RelationType tests
    #[test]
    fn test_relation_type_parse() {
        assert_eq!(
            "one-to-many".parse::<RelationType>().unwrap(),
            RelationType::OneToMany
        );
        assert_eq!(
            "ManyToMany".parse::<RelationType>().unwrap(),
            RelationType::ManyToMany
        );
        assert_eq!(
            serde_json::from_str::<RelationType>("\"many-to-one\"").unwrap(),
            RelationType::ManyToOne
        );
        assert!("sideways".parse::<RelationType>().is_err());
    }

    #[test]
    fn test_relation_type_inverse() {
        assert_eq!(RelationType::OneToMany.inverse(), RelationType::ManyToOne);
        assert_eq!(RelationType::OneToOne.inverse(), RelationType::OneToOne);
        assert!(RelationType::OneToMany.is_collection());
        assert!(!RelationType::ManyToOne.is_collection());
    }

    // Technology tests
    #[test]
    fn test_technology_parse() {
        assert_eq!(Technology::parse("DotNet"), Some(Technology::DotNet));
        assert_eq!(Technology::parse(".NET"), Some(Technology::DotNet));
        assert_eq!(Technology::parse("Spring Boot"), Some(Technology::Java));
        assert_eq!(Technology::parse("Node.js"), Some(Technology::NodeJs));
        assert_eq!(Technology::parse("NotARealTech"), None);
    }

    #[test]
    fn test_technology_from_str_error() {
        let err = "Cobol".parse::<Technology>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported technology: Cobol");
    }
}
