//! JPA entity template (Jakarta Persistence annotations, plain getters/setters).

use super::{PreviewTemplate, push_line};
use crate::context::PreviewContext;
use studio_core::{ColumnType, RelationType, Technology};
use studio_ir::{Column, DEFAULT_PRIMARY_KEY, Relationship};

/// Java / JPA preview template
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaTemplate;

impl JavaTemplate {
    fn render_column(&self, out: &mut String, ctx: &PreviewContext, column: &Column) {
        let field = PreviewContext::camel(&column.name);

        if column.is_primary_key {
            push_line(out, 1, "@Id");
            let strategy = if column.column_type == ColumnType::Guid {
                "UUID"
            } else {
                "IDENTITY"
            };
            push_line(
                out,
                1,
                &format!("@GeneratedValue(strategy = GenerationType.{})", strategy),
            );
        }

        let mut attrs: Vec<String> = Vec::new();
        if column.is_required && !column.is_primary_key {
            attrs.push("nullable = false".to_string());
        }
        if let Some(target) = ctx.referenced_name(column) {
            // The association owns the join column, the scalar mirrors it
            push_line(out, 1, &format!("// references {}", target));
            attrs.push("insertable = false".to_string());
            attrs.push("updatable = false".to_string());
        }
        if !attrs.is_empty() {
            push_line(out, 1, &format!("@Column({})", attrs.join(", ")));
        }
        push_line(
            out,
            1,
            &format!("private {} {};", self.type_name(column.column_type), field),
        );
        out.push('\n');
    }

    fn render_relationship(&self, out: &mut String, ctx: &PreviewContext, rel: &Relationship) {
        let target = ctx.target_name(rel);
        let field = PreviewContext::camel(&ctx.navigation_name(rel));
        let owner_field = PreviewContext::camel(&ctx.class_name());

        match rel.relation_type {
            RelationType::ManyToOne | RelationType::OneToOne => {
                let annotation = if rel.relation_type == RelationType::ManyToOne {
                    "@ManyToOne(fetch = FetchType.LAZY)"
                } else {
                    "@OneToOne(fetch = FetchType.LAZY)"
                };
                push_line(out, 1, annotation);
                push_line(
                    out,
                    1,
                    &format!("@JoinColumn(name = \"{}\")", join_column(&target, rel)),
                );
                push_line(out, 1, &format!("private {} {};", target, field));
            }
            RelationType::OneToMany => {
                push_line(
                    out,
                    1,
                    &format!("@OneToMany(mappedBy = \"{}\")", owner_field),
                );
                push_line(
                    out,
                    1,
                    &format!("private List<{}> {} = new ArrayList<>();", target, field),
                );
            }
            RelationType::ManyToMany => {
                let join_table = format!(
                    "{}_{}",
                    PreviewContext::snake(&ctx.class_name()),
                    PreviewContext::table_name(&target)
                );
                push_line(out, 1, "@ManyToMany");
                push_line(out, 1, &format!("@JoinTable(name = \"{}\",", join_table));
                push_line(
                    out,
                    2,
                    &format!(
                        "joinColumns = @JoinColumn(name = \"{}_id\"),",
                        PreviewContext::snake(&ctx.class_name())
                    ),
                );
                push_line(
                    out,
                    2,
                    &format!(
                        "inverseJoinColumns = @JoinColumn(name = \"{}_id\"))",
                        PreviewContext::snake(&target)
                    ),
                );
                push_line(
                    out,
                    1,
                    &format!("private Set<{}> {} = new HashSet<>();", target, field),
                );
            }
        }
        out.push('\n');
    }

    fn render_accessors(&self, out: &mut String, column: &Column) {
        let type_name = self.type_name(column.column_type);
        let field = PreviewContext::camel(&column.name);
        let property = PreviewContext::pascal(&column.name);

        push_line(
            out,
            1,
            &format!("public {} get{}() {{ return {}; }}", type_name, property, field),
        );
        push_line(
            out,
            1,
            &format!(
                "public void set{}({} {}) {{ this.{} = {}; }}",
                property, type_name, field, field, field
            ),
        );
    }
}

impl PreviewTemplate for JavaTemplate {
    fn technology(&self) -> Technology {
        Technology::Java
    }

    fn type_name(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::String => "String",
            ColumnType::Integer => "Integer",
            ColumnType::Decimal => "Double",
            ColumnType::Boolean => "Boolean",
            ColumnType::DateTime => "LocalDateTime",
            ColumnType::Guid => "UUID",
        }
    }

    fn render(&self, ctx: &PreviewContext) -> String {
        let class_name = ctx.class_name();
        let mut out = String::with_capacity(2048);

        out.push_str(&format!("package com.{}.model;\n\n", ctx.package_segment()));
        out.push_str("import jakarta.persistence.*;\n");
        out.push_str("import java.time.LocalDateTime;\n");
        out.push_str("import java.util.*;\n\n");
        out.push_str("@Entity\n");
        out.push_str(&format!(
            "@Table(name = \"{}\")\n",
            PreviewContext::table_name(&ctx.entity.name)
        ));
        out.push_str(&format!("public class {} {{\n\n", class_name));

        for column in ctx.columns() {
            self.render_column(&mut out, ctx, column);
        }
        for rel in ctx.outgoing_relationships() {
            self.render_relationship(&mut out, ctx, rel);
        }

        push_line(&mut out, 1, &format!("public {}() {{}}", class_name));
        for column in ctx.columns() {
            out.push('\n');
            self.render_accessors(&mut out, column);
        }

        out.push_str("}\n");
        out
    }
}

/// FK column name; the default `Id` would collide with the owner's `@Id`
fn join_column(target: &str, rel: &Relationship) -> String {
    if rel.from_column == DEFAULT_PRIMARY_KEY {
        format!("{}_id", PreviewContext::snake(target))
    } else {
        PreviewContext::snake(&rel.from_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_ir::Entity;

    fn shop() -> (Entity, Entity) {
        let customer = Entity::new("Customer");
        let customer_id = customer.id;
        let order = Entity::new("Order")
            .with_column(Column::new("CustomerId", ColumnType::Integer).references(customer_id))
            .with_column(Column::new("Total", ColumnType::Decimal).required());
        let order_id = order.id;
        let customer = customer.with_relationship(Relationship::new(
            customer_id,
            order_id,
            RelationType::OneToMany,
        ));
        let order = order.with_relationship(
            Relationship::new(order_id, customer_id, RelationType::ManyToOne)
                .with_from_column("CustomerId"),
        );
        (customer, order)
    }

    #[test]
    fn test_render_entity_header_and_columns() {
        let (customer, order) = shop();
        let all = vec![customer, order.clone()];
        let code = JavaTemplate.render(&PreviewContext::new(&order, &all, "My Shop"));

        assert!(code.starts_with("package com.myshop.model;"));
        assert!(code.contains("@Table(name = \"orders\")"));
        assert!(code.contains("public class Order {"));
        assert!(code.contains("@GeneratedValue(strategy = GenerationType.IDENTITY)"));
        assert!(code.contains("private Integer id;"));
        assert!(code.contains("@Column(nullable = false)\n    private Double total;"));
        assert!(code.contains("private Double total;"));
        assert!(code.contains("public Double getTotal() { return total; }"));
    }

    #[test]
    fn test_render_associations() {
        let (customer, order) = shop();
        let all = vec![customer.clone(), order.clone()];

        let code = JavaTemplate.render(&PreviewContext::new(&order, &all, "shop"));
        assert!(code.contains("@ManyToOne(fetch = FetchType.LAZY)"));
        assert!(code.contains("@JoinColumn(name = \"customer_id\")"));
        assert!(code.contains("private Customer customer;"));

        let code = JavaTemplate.render(&PreviewContext::new(&customer, &all, "shop"));
        assert!(code.contains("@OneToMany(mappedBy = \"customer\")"));
        assert!(code.contains("private List<Order> orders = new ArrayList<>();"));
    }

    #[test]
    fn test_many_to_many_join_table() {
        let tag = Entity::new("Tag");
        let post = Entity::new("Post");
        let post_id = post.id;
        let post = post.with_relationship(Relationship::new(
            post_id,
            tag.id,
            RelationType::ManyToMany,
        ));
        let all = vec![post.clone(), tag];
        let code = JavaTemplate.render(&PreviewContext::new(&post, &all, "blog"));

        assert!(code.contains("@JoinTable(name = \"post_tags\","));
        assert!(code.contains("private Set<Tag> tags = new HashSet<>();"));
    }

    #[test]
    fn test_default_join_column_names_target() {
        let owner = Entity::new("Owner");
        let pet = Entity::new("Pet");
        let pet_id = pet.id;
        let pet = pet.with_relationship(Relationship::new(
            pet_id,
            owner.id,
            RelationType::ManyToOne,
        ));
        let all = vec![owner, pet.clone()];
        let code = JavaTemplate.render(&PreviewContext::new(&pet, &all, "clinic"));

        assert!(code.contains("@JoinColumn(name = \"owner_id\")"));
        assert!(!code.contains("@JoinColumn(name = \"id\")"));
    }

    #[test]
    fn test_guid_primary_key_uses_uuid_strategy() {
        let mut entity = Entity::new("Token");
        entity.columns[0].column_type = ColumnType::Guid;
        let all = vec![entity.clone()];
        let code = JavaTemplate.render(&PreviewContext::new(&entity, &all, "auth"));
        assert!(code.contains("@GeneratedValue(strategy = GenerationType.UUID)"));
        assert!(code.contains("private UUID id;"));
    }
}
