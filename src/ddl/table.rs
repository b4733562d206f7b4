use super::partition::partitioning_clause;
use super::{DdlProvider, OBJECT_EXISTS, comment_statement, join_statements, wrap_if_not_exists};
use crate::activation::{Renderable, column_list, inline_comment, join_members};
use crate::ddl::column::key_options_clause;
use crate::ir::{CheckConstraintDef, ForeignKeyDef, TableDef};
use crate::keys::{KeyColumn, KeyConstraint};
use crate::naming::{qualified, quote, string_literal};
use crate::schema::{BlockchainClauses, ExternalTableClause, Storage};
use crate::template::Values;
use crate::templates;

/// Strip one pair of parentheses enclosing the whole expression.
fn strip_enclosing_parens(expression: &str) -> &str {
    let trimmed = expression.trim();
    let Some(inner) = trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) else {
        return trimmed;
    };
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return trimmed;
                }
            }
            _ => {}
        }
    }
    if depth == 0 { inner.trim() } else { trimmed }
}

/// Foreign key member list without parentheses.
fn foreign_columns(columns: &[KeyColumn], active: bool) -> String {
    if !active {
        return columns.iter().map(|c| quote(&c.name)).collect::<Vec<_>>().join(", ");
    }
    let live: Vec<String> = columns.iter().filter(|c| c.active).map(|c| quote(&c.name)).collect();
    let dead: Vec<String> = columns.iter().filter(|c| !c.active).map(|c| quote(&c.name)).collect();
    if dead.is_empty() {
        live.join(", ")
    } else {
        format!("{} {}", live.join(", "), inline_comment(&dead.join(", ")))
    }
}

fn blockchain_clause(clauses: &BlockchainClauses) -> Option<String> {
    let parts: Vec<&str> = [
        &clauses.blockchain_table_retention_clause,
        &clauses.blockchain_row_retention_clause,
        &clauses.blockchain_hash_and_data_format_clause,
    ]
    .into_iter()
    .filter_map(|c| c.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn storage_clause(storage: &Storage) -> String {
    let organization = storage
        .organization
        .as_deref()
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| "HEAP".to_string());
    if organization == "EXTERNAL" {
        return "ORGANIZATION EXTERNAL".to_string();
    }
    let tablespace = storage
        .tablespace
        .as_deref()
        .map(|t| format!(" TABLESPACE {}", quote(t)))
        .unwrap_or_default();
    let logging = if storage.logging { "LOGGING" } else { "NOLOGGING" };
    format!("ORGANIZATION {organization}{tablespace} {logging}")
}

fn external_table_clause(clause: &ExternalTableClause) -> Option<String> {
    let driver = clause.access_driver_type.as_deref()?.to_ascii_uppercase();
    let mut body = format!("TYPE {driver}");
    if let Some(directory) = &clause.default_directory {
        body.push_str(" DEFAULT DIRECTORY ");
        body.push_str(directory);
    }
    if clause.access_parameter_type.as_deref() != Some("NONE") {
        let parameters = match (&clause.clob_subquery, &clause.opaque_format_spec) {
            (Some(subquery), _) => Some(format!("USING CLOB {subquery}")),
            (None, Some(spec)) => Some(spec.clone()),
            (None, None) => None,
        };
        if let Some(parameters) = parameters {
            body.push_str(" ACCESS PARAMETERS ");
            body.push_str(&parameters);
        }
    }
    let locations: Vec<String> = clause
        .location
        .iter()
        .filter_map(|loc| {
            let specifier = string_literal(loc.location_specifier.as_deref()?);
            Some(match &loc.location_directory {
                Some(dir) => format!("{dir}:{specifier}"),
                None => specifier,
            })
        })
        .collect();
    if !locations.is_empty() {
        body.push_str(&format!(" LOCATION ({})", locations.join(", ")));
    }
    let limit = clause.reject_limit.as_deref().unwrap_or("UNLIMITED");
    Some(format!("({body}) REJECT LIMIT {limit}"))
}

/// Options following the column list, one clause per line.
fn table_options(table: &TableDef) -> Option<String> {
    let clauses: Vec<String> = [
        table.blockchain.as_ref().and_then(blockchain_clause),
        table.storage.as_ref().map(storage_clause),
        table.external_table.as_ref().and_then(external_table_clause),
        table
            .partitioning
            .as_ref()
            .and_then(|p| partitioning_clause(p, table.active)),
        table.select_statement.as_ref().map(|s| format!("AS {s}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!clauses.is_empty()).then(|| clauses.join("\n"))
}

impl DdlProvider {
    pub fn create_key_constraint(&self, key: &KeyConstraint, parent_active: bool) -> Renderable {
        let columns: Vec<Renderable> = key.columns.iter().map(KeyColumn::quoted).collect();
        let text = templates::KEY_CONSTRAINT.assemble(
            &Values::new()
                .opt("constraintName", key.options.constraint_name().map(quote))
                .set("keyType", key.kind.keyword())
                .set("columns", column_list(&columns, parent_active))
                .opt("options", key_options_clause(&key.options)),
        );
        Renderable::new(text, key.is_active())
    }

    pub fn create_check_constraint(&self, check: &CheckConstraintDef) -> Renderable {
        let text = templates::CHECK_CONSTRAINT.assemble(
            &Values::new()
                .opt("name", check.name.as_deref().map(quote))
                .set("expression", strip_enclosing_parens(&check.expression)),
        );
        Renderable::active(text)
    }

    /// Foreign key as a member of `CREATE TABLE`.
    pub fn create_foreign_key_constraint(&self, fk: &ForeignKeyDef, default_schema: Option<&str>) -> Renderable {
        let active = fk.is_active();
        let text = templates::FOREIGN_KEY_CONSTRAINT.assemble(
            &Values::new()
                .opt("name", fk.name.as_deref().map(quote))
                .set("foreignKey", foreign_columns(&fk.foreign_columns, active))
                .set(
                    "primaryTable",
                    qualified(&fk.primary_table, fk.primary_schema.as_deref().or(default_schema)),
                )
                .set("primaryKey", foreign_columns(&fk.primary_columns, active)),
        );
        Renderable::new(text, active)
    }

    /// Foreign key as a standalone `ALTER TABLE ... ADD CONSTRAINT`.
    pub fn create_foreign_key(&self, fk: &ForeignKeyDef, default_schema: Option<&str>) -> String {
        let active = fk.is_active();
        let text = templates::CREATE_FOREIGN_KEY.assemble(
            &Values::new()
                .set(
                    "foreignTable",
                    qualified(&fk.foreign_table, fk.foreign_schema.as_deref().or(default_schema)),
                )
                .opt("name", fk.name.as_deref().map(quote))
                .set("foreignKey", foreign_columns(&fk.foreign_columns, active))
                .set(
                    "primaryTable",
                    qualified(&fk.primary_table, fk.primary_schema.as_deref().or(default_schema)),
                )
                .set("primaryKey", foreign_columns(&fk.primary_columns, active)),
        );
        Renderable::new(text, active).render()
    }

    /// `CREATE TABLE` followed by its table and column comments. Members of
    /// the body are columns, key constraints, check constraints and foreign
    /// keys, in that order.
    pub fn create_table(&self, table: &TableDef) -> String {
        let name = qualified(&table.name, table.schema_name.as_deref());
        let schema = table.schema_name.as_deref();

        let mut members: Vec<Renderable> = table.columns.iter().map(|c| self.column_renderable(c)).collect();
        members.extend(
            table
                .key_constraints
                .iter()
                .map(|k| self.create_key_constraint(k, table.active)),
        );
        members.extend(table.check_constraints.iter().map(|c| self.create_check_constraint(c)));
        members.extend(
            table
                .foreign_keys
                .iter()
                .map(|fk| self.create_foreign_key_constraint(fk, schema)),
        );

        let statement = templates::CREATE_TABLE.assemble(
            &Values::new()
                .opt("tableType", table.kind.prefix())
                .set("name", name.clone())
                .set("tableProps", join_members(&members, ",\n\t", table.active))
                .opt("options", table_options(table)),
        );

        let mut units = vec![Renderable::new(
            wrap_if_not_exists(&statement, table.if_not_exist, OBJECT_EXISTS),
            table.active,
        )];
        if let Some(description) = table.description.as_deref().filter(|d| !d.trim().is_empty()) {
            units.push(Renderable::new(
                comment_statement("TABLE", &name, description),
                table.active,
            ));
        }
        units.extend(self.column_comments(&name, &table.columns, table.active));
        join_statements(&units)
    }
}
