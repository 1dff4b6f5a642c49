//! Connected-component grouping for diagram colors
//!
//! Relationships are treated as undirected edges. Entities reachable from one
//! another share a group id; an entity with no relationships is a group on
//! its own. Group ids follow the stored entity order and are recomputed from
//! scratch on every call.

use std::collections::HashMap;
use studio_core::EntityId;
use studio_ir::Entity;

/// Border colors handed out to groups
pub const GROUP_PALETTE: [&str; 10] = [
    "#3b82f6", // blue
    "#22c55e", // green
    "#f59e0b", // amber
    "#ef4444", // red
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
];

/// Group assignment for every entity
#[derive(Debug, Clone, Default)]
pub struct ConnectivityGroups {
    assignments: Vec<(EntityId, usize)>,
    lookup: HashMap<EntityId, usize>,
    count: usize,
}

impl ConnectivityGroups {
    /// Group id of an entity
    pub fn group_of(&self, id: EntityId) -> Option<usize> {
        self.lookup.get(&id).copied()
    }

    /// Number of distinct groups
    pub fn group_count(&self) -> usize {
        self.count
    }

    /// Whether two entities are connected
    pub fn same_group(&self, a: EntityId, b: EntityId) -> bool {
        match (self.group_of(a), self.group_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Members of a group, in stored order
    pub fn members(&self, group: usize) -> Vec<EntityId> {
        self.assignments
            .iter()
            .filter(|(_, g)| *g == group)
            .map(|(id, _)| *id)
            .collect()
    }

    /// `(entity, group)` pairs in stored order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, usize)> + '_ {
        self.assignments.iter().copied()
    }

    /// Display color for an entity's group
    pub fn color_of(&self, id: EntityId) -> Option<&'static str> {
        self.group_of(id).map(group_color)
    }
}

/// Partition entities into connected components
pub fn connected_groups(entities: &[Entity]) -> ConnectivityGroups {
    let mut adjacency: HashMap<EntityId, Vec<EntityId>> =
        entities.iter().map(|e| (e.id, Vec::new())).collect();

    for entity in entities {
        for relationship in &entity.relationships {
            let (a, b) = (relationship.from_entity, relationship.to_entity);
            if !adjacency.contains_key(&a) || !adjacency.contains_key(&b) {
                continue;
            }
            if let Some(neighbours) = adjacency.get_mut(&a) {
                neighbours.push(b);
            }
            if let Some(neighbours) = adjacency.get_mut(&b) {
                neighbours.push(a);
            }
        }
    }

    let mut lookup: HashMap<EntityId, usize> = HashMap::with_capacity(entities.len());
    let mut count = 0;

    for entity in entities {
        if lookup.contains_key(&entity.id) {
            continue;
        }
        let group = count;
        count += 1;

        let mut stack = vec![entity.id];
        lookup.insert(entity.id, group);
        while let Some(current) = stack.pop() {
            for next in adjacency.get(&current).into_iter().flatten() {
                if !lookup.contains_key(next) {
                    lookup.insert(*next, group);
                    stack.push(*next);
                }
            }
        }
    }

    let assignments = entities
        .iter()
        .filter_map(|e| lookup.get(&e.id).map(|g| (e.id, *g)))
        .collect();

    ConnectivityGroups {
        assignments,
        lookup,
        count,
    }
}

/// Hash of `group-{id}` folded into the palette
pub fn group_color(group: usize) -> &'static str {
    let key = format!("group-{}", group);
    let hash = key
        .chars()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
    GROUP_PALETTE[hash.unsigned_abs() as usize % GROUP_PALETTE.len()]
}

// ============================================================================
// Tests
// ============================================================================
