//! # Studio Diagram
//!
//! Presentation-side computations over the entity graph:
//!
//! - **layout**: round-robin grid placement of entity boxes
//! - **routing**: orthogonal connectors between placed boxes
//! - **connectivity**: connected components used to color related entities
//!
//! Everything here is a pure function of the ordered entity slice.

pub mod connectivity;
pub mod layout;
pub mod routing;

pub use connectivity::{ConnectivityGroups, GROUP_PALETTE, connected_groups, group_color};
pub use layout::{DiagramLayout, LayoutConfig, LayoutNode, NodePosition, compute_layout};
pub use routing::{
    Connection, ConnectorPath, Side, UNKNOWN_ENTITY_LABEL, route_connector, route_relationships,
    route_self_loop,
};

use studio_ir::Entity;

/// Everything needed to draw the diagram once
#[derive(Debug, Clone)]
pub struct DiagramSnapshot {
    pub layout: DiagramLayout,
    pub connections: Vec<Connection>,
    pub groups: ConnectivityGroups,
}

/// Compute layout, connectors and groups in one pass
pub fn build_diagram(entities: &[Entity], config: &LayoutConfig) -> DiagramSnapshot {
    let layout = compute_layout(entities, config);
    let connections = route_relationships(entities, &layout, config);
    let groups = connected_groups(entities);
    DiagramSnapshot {
        layout,
        connections,
        groups,
    }
}
