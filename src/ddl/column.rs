use super::{DdlProvider, comment_statement};
use crate::activation::Renderable;
use crate::ir::ColumnDef;
use crate::keys::KeyKind;
use crate::naming::{quote, string_literal};
use crate::schema::{Encryption, KeyOptions};
use crate::template::Values;
use crate::templates;

/// Key options in Oracle's clause order: defer, rely, index, validate,
/// exceptions.
pub(crate) fn key_options_clause(options: &KeyOptions) -> Option<String> {
    let parts: Vec<&str> = [
        &options.defer_clause,
        &options.rely,
        &options.index_clause,
        &options.validate,
        &options.exception_clause,
    ]
    .into_iter()
    .filter_map(|o| o.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn inline_key(kind: KeyKind, options: &KeyOptions) -> String {
    let mut clause = String::new();
    if let Some(name) = options.constraint_name() {
        clause.push_str("CONSTRAINT ");
        clause.push_str(&quote(name));
        clause.push(' ');
    }
    clause.push_str(kind.keyword());
    if let Some(opts) = key_options_clause(options) {
        clause.push(' ');
        clause.push_str(&opts);
    }
    clause
}

fn column_constraints(column: &ColumnDef) -> Option<String> {
    let mut parts = Vec::new();
    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }
    if let Some(options) = &column.primary_key {
        parts.push(inline_key(KeyKind::PrimaryKey, options));
    }
    if let Some(options) = &column.unique {
        parts.push(inline_key(KeyKind::Unique, options));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn encryption_clause(encryption: &Encryption) -> String {
    let mut clause = "ENCRYPT".to_string();
    if let Some(algorithm) = &encryption.encryption_algorithm {
        clause.push_str(" USING ");
        clause.push_str(&string_literal(algorithm));
    }
    if let Some(integrity) = &encryption.integrity_algorithm {
        clause.push(' ');
        clause.push_str(&string_literal(integrity));
    }
    if encryption.no_salt {
        clause.push_str(" NO SALT");
    }
    clause
}

impl DdlProvider {
    /// One column line with its activation, before any comment wrapping.
    pub fn column_renderable(&self, column: &ColumnDef) -> Renderable {
        let text = templates::COLUMN_DEFINITION.assemble(
            &Values::new()
                .set("name", quote(&column.name))
                .set("type", column.type_clause())
                .opt("default", column.default.as_deref())
                .opt("encrypt", column.encryption.as_ref().map(encryption_clause))
                .opt("constraints", column_constraints(column)),
        );
        Renderable::new(text, column.active)
    }

    /// Column line for a table body or `ADD (...)`; deactivated columns come
    /// back commented out.
    pub fn convert_column_definition(&self, column: &ColumnDef) -> String {
        self.column_renderable(column).render()
    }

    /// Object type attribute: name and type only.
    pub fn attribute_renderable(&self, column: &ColumnDef) -> Renderable {
        let text = templates::OBJECT_TYPE_ATTRIBUTE.assemble(
            &Values::new()
                .set("name", quote(&column.name))
                .set("type", column.type_clause()),
        );
        Renderable::new(text, column.active)
    }

    /// `COMMENT ON COLUMN` units for every described column of a table.
    pub(crate) fn column_comments(&self, table_name: &str, columns: &[ColumnDef], table_active: bool) -> Vec<Renderable> {
        columns
            .iter()
            .filter_map(|column| {
                let text = column.comment.as_deref().filter(|c| !c.trim().is_empty())?;
                let target = format!("{table_name}.{}", quote(&column.name));
                Some(Renderable::new(
                    comment_statement("COLUMN", &target, text),
                    table_active && column.active,
                ))
            })
            .collect()
    }
}
