//! # Preview Context
//!
//! The `PreviewContext` carries what a template needs to render one entity:
//!
//! - The selected entity and the full entity list (to resolve relationship
//!   and foreign key targets by id)
//! - The project name (namespaces and packages)
//! - Case conversion and pluralisation helpers shared by every template
//!

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use std::collections::HashMap;
use studio_core::EntityId;
use studio_ir::{Column, Entity, Relationship, UNKNOWN_TARGET};

// ============================================================================
// PreviewContext
// ============================================================================

/// Everything a template needs to render a single entity.
#[derive(Debug, Clone)]
pub struct PreviewContext<'a> {
    /// The entity being rendered
    pub entity: &'a Entity,

    /// Project name as typed in the wizard
    pub project_name: &'a str,

    /// Lookup: entity id → entity name
    names: HashMap<EntityId, &'a str>,
}

impl<'a> PreviewContext<'a> {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Build a context for `entity`, resolving references against `all`.
    pub fn new(entity: &'a Entity, all: &'a [Entity], project_name: &'a str) -> Self {
        let mut names: HashMap<EntityId, &'a str> =
            all.iter().map(|e| (e.id, e.name.as_str())).collect();
        names.insert(entity.id, entity.name.as_str());
        Self {
            entity,
            project_name,
            names,
        }
    }

    // ====================================================================
    // Entity accessors
    // ====================================================================

    /// PascalCase class / model name.
    pub fn class_name(&self) -> String {
        Self::pascal(&self.entity.name)
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &'a [Column] {
        &self.entity.columns
    }

    /// Relationships owned by the entity.
    pub fn outgoing_relationships(&self) -> &'a [Relationship] {
        &self.entity.relationships
    }

    /// Name of an entity by id, or `Unknown` if it no longer exists.
    pub fn entity_name(&self, id: EntityId) -> String {
        self.names
            .get(&id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_TARGET.to_string())
    }

    /// Class name of a relationship's target.
    pub fn target_name(&self, relationship: &Relationship) -> String {
        Self::pascal(&self.entity_name(relationship.to_entity))
    }

    /// Class name a foreign key column points at, if any.
    pub fn referenced_name(&self, column: &Column) -> Option<String> {
        if !column.is_foreign_key {
            return None;
        }
        Some(match column.referenced_entity {
            Some(id) => Self::pascal(&self.entity_name(id)),
            None => UNKNOWN_TARGET.to_string(),
        })
    }

    /// Navigation property name; collections are pluralised.
    pub fn navigation_name(&self, relationship: &Relationship) -> String {
        let target = self.target_name(relationship);
        if relationship.relation_type.is_collection() {
            Self::pluralize(&target)
        } else {
            target
        }
    }

    /// Project namespace (e.g. "my shop" → "MyShop"), `App` when blank.
    pub fn namespace(&self) -> String {
        let ns = Self::pascal(self.project_name);
        if ns.is_empty() { "App".to_string() } else { ns }
    }

    /// Lower-case Java package segment (e.g. "My-Shop" → "myshop").
    pub fn package_segment(&self) -> String {
        let segment: String = Self::snake(self.project_name)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if segment.is_empty() {
            "app".to_string()
        } else {
            segment
        }
    }

    // ====================================================================
    // Naming helpers
    // ====================================================================

    /// Convert a name to `snake_case` (e.g. "OrderLine" → "order_line").
    pub fn snake(name: &str) -> String {
        name.to_snake_case()
    }

    /// Convert a name to `PascalCase` (e.g. "order_line" → "OrderLine").
    pub fn pascal(name: &str) -> String {
        name.to_pascal_case()
    }

    /// Convert a name to `camelCase` (e.g. "CustomerId" → "customerId").
    pub fn camel(name: &str) -> String {
        name.to_lower_camel_case()
    }

    /// Pluralise a word with simple English heuristics, keeping its casing.
    pub fn pluralize(word: &str) -> String {
        let lower = word.to_ascii_lowercase();
        if lower.ends_with('s')
            || lower.ends_with('x')
            || lower.ends_with("ch")
            || lower.ends_with("sh")
        {
            format!("{}es", word)
        } else if lower.ends_with('y')
            && !lower.ends_with("ey")
            && !lower.ends_with("ay")
            && !lower.ends_with("oy")
            && !lower.ends_with("uy")
        {
            format!("{}ies", &word[..word.len() - 1])
        } else {
            format!("{}s", word)
        }
    }

    /// Entity name → table name (snake_case plural, e.g. "OrderLine" → "order_lines").
    pub fn table_name(entity_name: &str) -> String {
        Self::pluralize(&Self::snake(entity_name))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::RelationType;

    #[test]
    fn test_case_helpers() {
        assert_eq!(PreviewContext::snake("OrderLine"), "order_line");
        assert_eq!(PreviewContext::pascal("order_line"), "OrderLine");
        assert_eq!(PreviewContext::camel("CustomerId"), "customerId");
        assert_eq!(PreviewContext::camel("Id"), "id");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(PreviewContext::pluralize("Order"), "Orders");
        assert_eq!(PreviewContext::pluralize("Category"), "Categories");
        assert_eq!(PreviewContext::pluralize("Address"), "Addresses");
        assert_eq!(PreviewContext::pluralize("Box"), "Boxes");
        assert_eq!(PreviewContext::pluralize("Key"), "Keys");
        assert_eq!(PreviewContext::pluralize("Status"), "Statuses");
        assert_eq!(PreviewContext::table_name("OrderLine"), "order_lines");
    }

    #[test]
    fn test_navigation_names() {
        let customer = Entity::new("Customer");
        let category = Entity::new("Category");
        let id = customer.id;
        let customer = customer
            .with_relationship(Relationship::new(id, category.id, RelationType::OneToMany))
            .with_relationship(Relationship::new(
                id,
                uuid::Uuid::now_v7(),
                RelationType::OneToOne,
            ));
        let all = vec![customer.clone(), category];
        let ctx = PreviewContext::new(&customer, &all, "my shop");

        let rels = ctx.outgoing_relationships();
        assert_eq!(ctx.navigation_name(&rels[0]), "Categories");
        assert_eq!(ctx.navigation_name(&rels[1]), "Unknown");
        assert_eq!(ctx.namespace(), "MyShop");
        assert_eq!(ctx.package_segment(), "myshop");
    }
}
