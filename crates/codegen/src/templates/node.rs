//! Mongoose schema template for Node.js.

use super::{PreviewTemplate, push_line};
use crate::context::PreviewContext;
use studio_core::{ColumnType, Technology};
use studio_ir::Column;

const OBJECT_ID: &str = "mongoose.Schema.Types.ObjectId";

/// Node.js / Mongoose preview template
#[derive(Debug, Clone, Copy, Default)]
pub struct MongooseTemplate;

impl MongooseTemplate {
    fn column_definition(&self, ctx: &PreviewContext, column: &Column) -> String {
        let mut parts = Vec::with_capacity(4);
        match ctx.referenced_name(column) {
            Some(target) => {
                parts.push(format!("type: {}", OBJECT_ID));
                parts.push(format!("ref: '{}'", target));
            }
            None => parts.push(format!("type: {}", self.type_name(column.column_type))),
        }
        if column.is_required || column.is_primary_key {
            parts.push("required: true".to_string());
        }
        if column.is_primary_key {
            parts.push("unique: true".to_string());
        }
        format!("{{ {} }}", parts.join(", "))
    }
}

impl PreviewTemplate for MongooseTemplate {
    fn technology(&self) -> Technology {
        Technology::NodeJs
    }

    fn type_name(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::String => "String",
            ColumnType::Integer | ColumnType::Decimal => "Number",
            ColumnType::Boolean => "Boolean",
            ColumnType::DateTime => "Date",
            ColumnType::Guid => "mongoose.Schema.Types.UUID",
        }
    }

    fn render(&self, ctx: &PreviewContext) -> String {
        let class_name = ctx.class_name();
        let schema = format!("{}Schema", PreviewContext::camel(&class_name));
        let mut fields: Vec<String> = Vec::new();

        for column in ctx.columns() {
            fields.push(format!(
                "{}: {}",
                PreviewContext::camel(&column.name),
                self.column_definition(ctx, column)
            ));
        }
        for rel in ctx.outgoing_relationships() {
            let reference = format!("{{ type: {}, ref: '{}' }}", OBJECT_ID, ctx.target_name(rel));
            let definition = if rel.relation_type.is_collection() {
                format!("[{}]", reference)
            } else {
                reference
            };
            fields.push(format!(
                "{}: {}",
                PreviewContext::camel(&ctx.navigation_name(rel)),
                definition
            ));
        }

        let mut out = String::with_capacity(1024);
        out.push_str("const mongoose = require('mongoose');\n\n");
        out.push_str(&format!("const {} = new mongoose.Schema(\n", schema));
        push_line(&mut out, 1, "{");
        let last = fields.len().saturating_sub(1);
        for (i, field) in fields.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            push_line(&mut out, 2, &format!("{}{}", field, sep));
        }
        push_line(&mut out, 1, "},");
        push_line(&mut out, 1, "{ timestamps: true }");
        out.push_str(");\n\n");
        out.push_str(&format!(
            "module.exports = mongoose.model('{}', {});\n",
            class_name, schema
        ));
        out
    }
}
