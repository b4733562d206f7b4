use super::{DdlProvider, OBJECT_EXISTS, comment_statement, join_statements, wrap_if_not_exists};
use crate::activation::{Renderable, join_members};
use crate::ir::{ViewDef, ViewKeyDef};
use crate::naming::{qualified, quote};
use crate::template::Values;
use crate::templates;

fn view_type(view: &ViewDef) -> Option<String> {
    let words: Vec<&str> = [
        view.editionable.then_some("EDITIONABLE"),
        view.editioning.then_some("EDITIONING"),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

fn key_with_alias(name: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{} as {}", quote(name), quote(alias)),
        None => quote(name),
    }
}

/// `SELECT` built from the view's keys, with each source table listed once
/// in first-use order.
fn generated_select(view: &ViewDef) -> String {
    let mut tables: Vec<String> = Vec::new();
    let mut columns: Vec<Renderable> = Vec::new();
    for key in &view.keys {
        match key {
            ViewKeyDef::Expression(expression) => columns.push(Renderable::active(expression.as_str())),
            ViewKeyDef::Column {
                table: None,
                name,
                alias,
                active,
            } => columns.push(Renderable::new(key_with_alias(name, alias.as_deref()), *active)),
            ViewKeyDef::Column {
                table: Some(table),
                name,
                alias,
                active,
            } => {
                let table = qualified(table, view.schema_name.as_deref());
                columns.push(Renderable::new(
                    format!("{table}.{}", key_with_alias(name, alias.as_deref())),
                    *active,
                ));
                if !tables.contains(&table) {
                    tables.push(table);
                }
            }
        }
    }
    templates::VIEW_SELECT_STATEMENT.assemble(
        &Values::new()
            .set("keys", join_members(&columns, ",\n\t\t", view.active))
            .opt("tableName", (!tables.is_empty()).then(|| tables.join(", "))),
    )
}

impl DdlProvider {
    /// `CREATE VIEW` plus its comment. An explicit select statement wins over
    /// one generated from the view's keys.
    pub fn create_view(&self, view: &ViewDef) -> String {
        let name = qualified(&view.name, view.schema_name.as_deref());
        let select = view
            .select_statement
            .clone()
            .unwrap_or_else(|| generated_select(view));
        let statement = templates::CREATE_VIEW.assemble(
            &Values::new()
                .flag("orReplace", view.or_replace, "OR REPLACE")
                .flag("force", view.force, "FORCE")
                .opt("viewType", view_type(view))
                .set("name", name.clone())
                .set("selectStatement", select),
        );

        let mut units = vec![Renderable::new(
            wrap_if_not_exists(&statement, view.if_not_exist, OBJECT_EXISTS),
            view.active,
        )];
        if let Some(description) = view.description.as_deref().filter(|d| !d.trim().is_empty()) {
            units.push(Renderable::new(comment_statement("TABLE", &name, description), view.active));
        }
        join_statements(&units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(keys: Vec<ViewKeyDef>) -> ViewDef {
        ViewDef {
            name: "v_orders".to_string(),
            schema_name: Some("SALES".to_string()),
            keys,
            or_replace: false,
            force: false,
            editionable: false,
            editioning: false,
            select_statement: None,
            description: None,
            if_not_exist: false,
            active: true,
        }
    }

    fn column(table: &str, name: &str, alias: Option<&str>, active: bool) -> ViewKeyDef {
        ViewKeyDef::Column {
            table: Some(table.to_string()),
            name: name.to_string(),
            alias: alias.map(str::to_string),
            active,
        }
    }

    #[test]
    fn test_view_from_keys() {
        let provider = DdlProvider::default();
        let mut v = view(vec![
            column("orders", "id", Some("order_id"), true),
            column("orders", "total", None, true),
            column("customers", "name", None, true),
        ]);
        v.or_replace = true;
        v.force = true;
        assert_eq!(
            provider.create_view(&v),
            "CREATE OR REPLACE FORCE VIEW \"SALES\".\"v_orders\"\n\tAS SELECT \"SALES\".\"orders\".\"id\" as \"order_id\",\n\t\t\"SALES\".\"orders\".\"total\",\n\t\t\"SALES\".\"customers\".\"name\"\n\tFROM \"SALES\".\"orders\", \"SALES\".\"customers\";"
        );
    }

    #[test]
    fn test_view_with_select_statement_and_comment() {
        let provider = DdlProvider::default();
        let mut v = view(Vec::new());
        v.editionable = true;
        v.select_statement = Some("SELECT * FROM dual".to_string());
        v.description = Some("daily".to_string());
        assert_eq!(
            provider.create_view(&v),
            "CREATE EDITIONABLE VIEW \"SALES\".\"v_orders\"\n\tAS SELECT * FROM dual;\n\nCOMMENT ON TABLE \"SALES\".\"v_orders\" IS 'daily';"
        );
    }

    #[test]
    fn test_inactive_view_column() {
        let provider = DdlProvider::default();
        let v = view(vec![column("t", "a", None, true), column("t", "b", None, false)]);
        assert_eq!(
            provider.create_view(&v),
            "CREATE VIEW \"SALES\".\"v_orders\"\n\tAS SELECT \"SALES\".\"t\".\"a\"\n\t\t/* \"SALES\".\"t\".\"b\" */\n\tFROM \"SALES\".\"t\";"
        );
    }

    #[test]
    fn test_view_if_not_exists() {
        let provider = DdlProvider::default();
        let mut v = view(Vec::new());
        v.select_statement = Some("SELECT 'x' FROM dual".to_string());
        v.if_not_exist = true;
        let ddl = provider.create_view(&v);
        assert!(ddl.starts_with("DECLARE\nBEGIN\n\tEXECUTE IMMEDIATE 'CREATE VIEW"));
        assert!(ddl.contains("SELECT ''x'' FROM dual';"));
        assert!(ddl.contains("SQLCODE = -955"));
    }
}
