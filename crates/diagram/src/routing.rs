//! Orthogonal connector routing between entity boxes.
//!
//! Connectors leave and enter boxes at the vertical center of a side edge.
//! Boxes in different grid columns are joined through the horizontal midpoint
//! between the two connection points; boxes in the same column get a short
//! detour outside the column. The router does not look at unrelated boxes,
//! so a connector may cross a box that sits between its endpoints.

use crate::layout::{DiagramLayout, LayoutConfig, NodePosition};
use serde::Serialize;
use std::collections::HashMap;
use studio_core::{EntityId, Position, RelationType};
use studio_ir::Entity;

/// Horizontal detour for connectors between boxes in the same column
pub const SAME_COLUMN_OFFSET: f32 = 30.0;

/// Label used when a relationship points at an entity that no longer exists
pub const UNKNOWN_ENTITY_LABEL: &str = studio_ir::UNKNOWN_TARGET;

// ============================================================================
// Path types
// ============================================================================

/// Side of a box a connector attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

/// An orthogonal polyline from source to target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorPath {
    pub source_side: Side,
    pub target_side: Side,
    /// Points in drawing order, first on the source edge, last on the target edge
    pub points: Vec<Position>,
}

impl ConnectorPath {
    pub fn start(&self) -> Option<Position> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Position> {
        self.points.last().copied()
    }

    /// SVG path data (`M x,y L x,y ...`)
    pub fn to_svg_path(&self) -> String {
        let mut data = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                data.push(' ');
            }
            let command = if i == 0 { 'M' } else { 'L' };
            data.push_str(&format!("{} {},{}", command, p.x, p.y));
        }
        data
    }

    /// Total length of all segments
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| (w[1].x - w[0].x).abs() + (w[1].y - w[0].y).abs())
            .sum()
    }

    /// Every segment is horizontal or vertical
    pub fn is_orthogonal(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
    }

    /// Midpoint of the middle segment, where the cardinality label goes
    pub fn label_anchor(&self) -> Option<Position> {
        let n = self.points.len();
        if n < 2 {
            return self.points.first().copied();
        }
        let i = (n - 1) / 2;
        Some(self.points[i].midpoint(&self.points[i + 1]))
    }
}

fn edge_point(node: &NodePosition, side: Side, config: &LayoutConfig) -> Position {
    let x = match side {
        Side::Left => node.x,
        Side::Right => node.x + config.column_width,
    };
    Position::new(x, node.center_y())
}

// ============================================================================
// Routing
// ============================================================================

/// Route a connector between two placed boxes
pub fn route_connector(
    source: &NodePosition,
    target: &NodePosition,
    config: &LayoutConfig,
) -> ConnectorPath {
    let source_column = config.column_index_of(source.x);
    let target_column = config.column_index_of(target.x);

    if source_column == target_column {
        let side = if source_column == 0 {
            Side::Left
        } else {
            Side::Right
        };
        let start = edge_point(source, side, config);
        let end = edge_point(target, side, config);
        let detour_x = match side {
            Side::Left => start.x - SAME_COLUMN_OFFSET,
            Side::Right => start.x + SAME_COLUMN_OFFSET,
        };
        return ConnectorPath {
            source_side: side,
            target_side: side,
            points: vec![
                start,
                Position::new(detour_x, start.y),
                Position::new(detour_x, end.y),
                end,
            ],
        };
    }

    let source_side = if source_column >= target_column {
        Side::Left
    } else {
        Side::Right
    };
    let target_side = if target_column >= source_column {
        Side::Right
    } else {
        Side::Left
    };

    let start = edge_point(source, source_side, config);
    let end = edge_point(target, target_side, config);
    let mid_x = (start.x + end.x) / 2.0;

    ConnectorPath {
        source_side,
        target_side,
        points: vec![
            start,
            Position::new(mid_x, start.y),
            Position::new(mid_x, end.y),
            end,
        ],
    }
}

/// Loop for a relationship from an entity to itself
pub fn route_self_loop(node: &NodePosition, config: &LayoutConfig) -> ConnectorPath {
    let x = node.x + config.column_width;
    let y_top = node.y + node.height * 0.3;
    let y_bottom = node.y + node.height * 0.7;

    ConnectorPath {
        source_side: Side::Right,
        target_side: Side::Right,
        points: vec![
            Position::new(x, y_top),
            Position::new(x + SAME_COLUMN_OFFSET, y_top),
            Position::new(x + SAME_COLUMN_OFFSET, y_bottom),
            Position::new(x, y_bottom),
        ],
    }
}

// ============================================================================
// Connections
// ============================================================================

/// A relationship ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub from: EntityId,
    pub to: EntityId,
    pub relation_type: RelationType,
    /// Name of the target entity, or `Unknown` when it no longer exists
    pub target_label: String,
    /// `None` when either end is missing from the layout
    pub path: Option<ConnectorPath>,
}

impl Connection {
    /// Whether the target entity could not be resolved
    pub fn is_dangling(&self) -> bool {
        self.path.is_none()
    }
}

/// Build one connection per relationship, in entity then relationship order
///
/// A relationship whose target is gone still produces a connection, labelled
/// `Unknown` and without a path.
pub fn route_relationships(
    entities: &[Entity],
    layout: &DiagramLayout,
    config: &LayoutConfig,
) -> Vec<Connection> {
    let names: HashMap<EntityId, &str> =
        entities.iter().map(|e| (e.id, e.name.as_str())).collect();

    let mut connections = Vec::new();
    for entity in entities {
        for relationship in &entity.relationships {
            let target_label = names
                .get(&relationship.to_entity)
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNKNOWN_ENTITY_LABEL.to_string());

            let path = match (
                layout.get(relationship.from_entity),
                layout.get(relationship.to_entity),
            ) {
                (Some(source), Some(_)) if relationship.is_self_referential() => {
                    Some(route_self_loop(source, config))
                }
                (Some(source), Some(target)) => Some(route_connector(source, target, config)),
                _ => {
                    tracing::debug!(
                        from = %relationship.from_entity,
                        to = %relationship.to_entity,
                        "Relationship target not in layout"
                    );
                    None
                }
            };

            connections.push(Connection {
                from: relationship.from_entity,
                to: relationship.to_entity,
                relation_type: relationship.relation_type,
                target_label,
                path,
            });
        }
    }
    connections
}

// ============================================================================
// Tests
// ============================================================================
