//! # Entity Framework Core Template
//!
//! Renders a C# entity class with data annotations:
//!
//! - `[Key]` on primary key columns
//! - `[Required]` on other required columns
//! - `[ForeignKey("Nav")]` on foreign key columns, naming the navigation
//! - `virtual` navigation properties, `ICollection<T>` for collections

use super::{PreviewTemplate, push_line};
use crate::context::PreviewContext;
use studio_core::{ColumnType, Technology};
use studio_ir::Column;

/// C# / EF Core preview template
#[derive(Debug, Clone, Copy, Default)]
pub struct DotNetTemplate;

impl DotNetTemplate {
    fn property_type(&self, column: &Column) -> String {
        let base = self.type_name(column.column_type);
        if column.is_required || column.is_primary_key {
            base.to_string()
        } else {
            format!("{}?", base)
        }
    }
}

impl PreviewTemplate for DotNetTemplate {
    fn technology(&self) -> Technology {
        Technology::DotNet
    }

    fn type_name(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::String => "string",
            ColumnType::Integer => "int",
            ColumnType::Decimal => "decimal",
            ColumnType::Boolean => "bool",
            ColumnType::DateTime => "DateTime",
            ColumnType::Guid => "Guid",
        }
    }

    fn render(&self, ctx: &PreviewContext) -> String {
        let class_name = ctx.class_name();
        let mut out = String::with_capacity(1024);

        out.push_str("using System;\n");
        out.push_str("using System.Collections.Generic;\n");
        out.push_str("using System.ComponentModel.DataAnnotations;\n");
        out.push_str("using System.ComponentModel.DataAnnotations.Schema;\n\n");
        out.push_str(&format!("namespace {}.Models\n{{\n", ctx.namespace()));
        push_line(&mut out, 1, &format!("public class {}", class_name));
        push_line(&mut out, 1, "{");

        for column in ctx.columns() {
            if column.is_primary_key {
                push_line(&mut out, 2, "[Key]");
            } else if column.is_required {
                push_line(&mut out, 2, "[Required]");
            }
            if let Some(target) = ctx.referenced_name(column) {
                push_line(&mut out, 2, &format!("[ForeignKey(\"{}\")]", target));
            }
            push_line(
                &mut out,
                2,
                &format!(
                    "public {} {} {{ get; set; }}",
                    self.property_type(column),
                    PreviewContext::pascal(&column.name)
                ),
            );
            out.push('\n');
        }

        for relationship in ctx.outgoing_relationships() {
            let target = ctx.target_name(relationship);
            let nav = ctx.navigation_name(relationship);
            let line = if relationship.relation_type.is_collection() {
                format!(
                    "public virtual ICollection<{}> {} {{ get; set; }} = new List<{}>();",
                    target, nav, target
                )
            } else {
                format!("public virtual {}? {} {{ get; set; }}", target, nav)
            };
            push_line(&mut out, 2, &line);
        }

        // Drop the blank line left after the last member
        if out.ends_with("\n\n") {
            out.pop();
        }
        push_line(&mut out, 1, "}");
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::RelationType;
    use studio_ir::{Entity, Relationship};

    #[test]
    fn test_render_with_navigation() {
        let customer = Entity::new("Customer");
        let customer_id = customer.id;
        let mut order = Entity::new("Order")
            .with_column(Column::new("CustomerId", ColumnType::Integer).references(customer_id))
            .with_column(Column::new("Notes", ColumnType::String));
        let order_id = order.id;
        order.relationships.push(Relationship::new(
            order_id,
            customer_id,
            RelationType::ManyToOne,
        ));
        let customer = customer.with_relationship(Relationship::new(
            customer_id,
            order_id,
            RelationType::OneToMany,
        ));
        let all = vec![customer.clone(), order.clone()];

        let code = DotNetTemplate.render(&PreviewContext::new(&order, &all, "shop"));
        assert!(code.contains("namespace Shop.Models"));
        assert!(code.contains("public class Order"));
        assert!(code.contains("[ForeignKey(\"Customer\")]"));
        assert!(code.contains("public int? CustomerId { get; set; }"));
        assert!(code.contains("public string? Notes { get; set; }"));
        assert!(code.contains("public virtual Customer? Customer { get; set; }"));

        let code = DotNetTemplate.render(&PreviewContext::new(&customer, &all, "shop"));
        assert!(code.contains(
            "public virtual ICollection<Order> Orders { get; set; } = new List<Order>();"
        ));
        assert!(code.ends_with("    }\n}\n"));
    }
}
