//! Grid layout for entity boxes
//!
//! Entities are dealt round-robin into a fixed number of columns in their
//! stored order. Each column keeps a running height so boxes in the same
//! column never overlap. The layout is a pure function of the ordered entity
//! slice; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use studio_core::{EntityId, Position, Rect, Size};
use studio_ir::Entity;

// ============================================================================
// Constants
// ============================================================================

/// Height of a box before any column rows are added
pub const BOX_HEADER_HEIGHT: f32 = 100.0;

/// Height added per column row
pub const COLUMN_ROW_HEIGHT: f32 = 20.0;

// ============================================================================
// LayoutConfig
// ============================================================================

/// Grid parameters for the diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of grid columns
    pub columns: usize,

    /// Width of every entity box
    pub column_width: f32,

    /// Gap around and between boxes
    pub padding: f32,

    /// Minimum box height
    pub base_row_height: f32,
}

impl LayoutConfig {
    /// Settings for the fullscreen diagram: same policy, roomier grid
    pub fn fullscreen() -> Self {
        Self {
            column_width: 320.0,
            padding: 60.0,
            ..Self::default()
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_base_row_height(mut self, height: f32) -> Self {
        self.base_row_height = height;
        self
    }

    pub fn with_column_width(mut self, width: f32) -> Self {
        self.column_width = width;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Column count, never zero
    pub fn column_count(&self) -> usize {
        self.columns.max(1)
    }

    /// Horizontal distance between the left edges of neighbouring columns
    pub fn column_stride(&self) -> f32 {
        self.column_width + self.padding
    }

    /// Left x coordinate of a grid column
    pub fn column_x(&self, column: usize) -> f32 {
        self.padding + column as f32 * self.column_stride()
    }

    /// Grid column a box with left edge `x` belongs to
    pub fn column_index_of(&self, x: f32) -> usize {
        let stride = self.column_stride();
        if stride <= 0.0 || x <= 0.0 {
            return 0;
        }
        (x / stride).floor() as usize
    }

    /// Box height for an entity with `column_count` columns
    pub fn entity_height(&self, column_count: usize) -> f32 {
        self.base_row_height
            .max(BOX_HEADER_HEIGHT + column_count as f32 * COLUMN_ROW_HEIGHT)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            column_width: 260.0,
            padding: 40.0,
            base_row_height: 140.0,
        }
    }
}

// ============================================================================
// Layout output
// ============================================================================

/// Computed placement of one entity box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    /// Grid column the box was assigned to
    pub column: usize,
}

impl NodePosition {
    /// Bounding rectangle, using the configured box width
    pub fn rect(&self, config: &LayoutConfig) -> Rect {
        Rect::new(
            Position::new(self.x, self.y),
            Size::new(config.column_width, self.height),
        )
    }

    /// Vertical center of the box
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// One laid-out entity
#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode {
    pub id: EntityId,
    pub name: String,
    pub position: NodePosition,
}

/// Positions for every entity, in stored order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagramLayout {
    pub nodes: Vec<LayoutNode>,
    /// Canvas size needed to show every box with padding
    pub canvas: Option<Size>,
    #[serde(skip)]
    index: HashMap<EntityId, usize>,
}

impl DiagramLayout {
    /// Position of an entity, if it was part of the layout
    pub fn get(&self, id: EntityId) -> Option<&NodePosition> {
        self.index.get(&id).map(|&i| &self.nodes[i].position)
    }

    /// Number of laid-out entities
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entity whose box contains the point (for hover handling)
    pub fn hit_test(&self, point: Position, config: &LayoutConfig) -> Option<EntityId> {
        self.nodes
            .iter()
            .find(|n| n.position.rect(config).contains(point))
            .map(|n| n.id)
    }
}

// ============================================================================
// Layout computation
// ============================================================================

/// Place every entity on the grid
pub fn compute_layout(entities: &[Entity], config: &LayoutConfig) -> DiagramLayout {
    let columns = config.column_count();
    let mut column_heights = vec![config.padding; columns];
    let mut layout = DiagramLayout::default();

    for (index, entity) in entities.iter().enumerate() {
        let column = index % columns;
        let height = config.entity_height(entity.column_count());
        let position = NodePosition {
            x: config.column_x(column),
            y: column_heights[column],
            height,
            column,
        };
        column_heights[column] += height + config.padding;

        layout.index.insert(entity.id, layout.nodes.len());
        layout.nodes.push(LayoutNode {
            id: entity.id,
            name: entity.name.clone(),
            position,
        });
    }

    if !entities.is_empty() {
        let used_columns = entities.len().min(columns);
        let width = config.column_x(used_columns);
        let height = column_heights.iter().copied().fold(0.0_f32, f32::max);
        layout.canvas = Some(Size::new(width, height));
    }

    tracing::trace!(entities = entities.len(), "Computed diagram layout");
    layout
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::ColumnType;
    use studio_ir::Column;

    fn entities(count: usize) -> Vec<Entity> {
        (0..count).map(|i| Entity::new(format!("E{}", i))).collect()
    }

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.columns, 3);
        assert_eq!(config.column_x(0), 40.0);
        assert_eq!(config.column_x(2), 640.0);
        assert_eq!(config.column_index_of(40.0), 0);
        assert_eq!(config.column_index_of(340.0), 1);
        assert_eq!(config.column_index_of(640.0), 2);
    }

    #[test]
    fn test_entity_height() {
        let config = LayoutConfig::default();
        assert_eq!(config.entity_height(0), 140.0);
        assert_eq!(config.entity_height(2), 140.0);
        assert_eq!(config.entity_height(5), 200.0);
    }

    #[test]
    fn test_round_robin_columns() {
        let config = LayoutConfig::default();
        let entities = entities(7);
        let layout = compute_layout(&entities, &config);

        let columns: Vec<usize> = entities
            .iter()
            .map(|e| config.column_index_of(layout.get(e.id).unwrap().x))
            .collect();
        assert_eq!(columns, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_same_column_boxes_do_not_overlap() {
        let config = LayoutConfig::default();
        let mut entities = entities(7);
        for _ in 0..6 {
            entities[3]
                .columns
                .push(Column::new("Extra", ColumnType::String));
        }
        let layout = compute_layout(&entities, &config);

        for column in 0..3 {
            let in_column: Vec<&NodePosition> = layout
                .nodes
                .iter()
                .map(|n| &n.position)
                .filter(|p| p.column == column)
                .collect();
            for pair in in_column.windows(2) {
                assert!(pair[1].y >= pair[0].y + pair[0].height + config.padding);
            }
        }

        let first = layout.get(entities[0].id).unwrap();
        let fourth = layout.get(entities[3].id).unwrap();
        let seventh = layout.get(entities[6].id).unwrap();
        assert_eq!(first.y, 40.0);
        assert_eq!(fourth.y, 40.0 + 140.0 + 40.0);
        assert_eq!(fourth.height, 260.0);
        assert_eq!(seventh.y, fourth.y + 260.0 + 40.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = LayoutConfig::default();
        let entities = entities(5);
        let a = compute_layout(&entities, &config);
        let b = compute_layout(&entities, &config);
        for (x, y) in a.nodes.iter().zip(b.nodes.iter()) {
            assert_eq!(x.position, y.position);
        }
    }

    #[test]
    fn test_canvas_size_and_hit_test() {
        let config = LayoutConfig::default();
        let entities = entities(4);
        let layout = compute_layout(&entities, &config);

        let canvas = layout.canvas.unwrap();
        assert_eq!(canvas.width, 940.0);
        assert_eq!(canvas.height, 40.0 + 2.0 * (140.0 + 40.0));

        assert_eq!(
            layout.hit_test(Position::new(50.0, 50.0), &config),
            Some(entities[0].id)
        );
        assert_eq!(layout.hit_test(Position::new(10.0, 10.0), &config), None);
        assert!(compute_layout(&[], &config).canvas.is_none());
    }

    #[test]
    fn test_zero_columns_falls_back_to_one() {
        let config = LayoutConfig::default().with_columns(0);
        let layout = compute_layout(&entities(2), &config);
        assert!(layout.nodes.iter().all(|n| n.position.column == 0));
    }
}
