//! DDL provider: hydrates schema nodes and renders CREATE statements.

mod column;
mod index;
mod partition;
mod table;
mod udt;
mod view;

pub use partition::PartitionBy;

use crate::activation::Renderable;
use crate::ir::{ColumnDef, SchemaContext, SchemaDef, TableDef, UdtDef, ViewDef};
use crate::naming::{quote, string_literal};
use crate::schema::{ContainerNode, PropertyNode, TableNode, UdtNode, ViewNode};
use crate::template::Values;
use crate::templates;

/// `ORA-00955: name is already used by an existing object`.
pub const OBJECT_EXISTS: u32 = 955;
/// `ORA-01920: user name conflicts with another user or role name`.
pub const USER_EXISTS: u32 = 1920;

#[derive(Debug, Clone, Default)]
pub struct DdlProvider {
    db_version: Option<String>,
}

impl DdlProvider {
    pub fn new(db_version: Option<String>) -> Self {
        Self { db_version }
    }

    pub fn db_version(&self) -> Option<&str> {
        self.db_version.as_deref()
    }

    pub fn context(&self, schema_name: Option<&str>) -> SchemaContext {
        SchemaContext::new(schema_name.map(str::to_string), self.db_version.clone())
    }

    pub fn hydrate_schema(&self, key: &str, node: &ContainerNode) -> SchemaDef {
        let name = node
            .code
            .as_deref()
            .or(node.name.as_deref())
            .unwrap_or(key)
            .to_string();
        SchemaDef {
            name,
            if_not_exist: node.if_not_exist,
            active: node.is_activated,
        }
    }

    pub fn hydrate_column(
        &self,
        name: &str,
        property: &PropertyNode,
        required: &[String],
        schema_name: Option<&str>,
    ) -> ColumnDef {
        ColumnDef::from_property(name, property, required, &self.context(schema_name))
    }

    pub fn hydrate_table(&self, node: &TableNode, schema_name: Option<&str>) -> Option<TableDef> {
        TableDef::from_node(node, &self.context(schema_name))
    }

    pub fn hydrate_view(&self, node: &ViewNode, schema_name: Option<&str>) -> Option<ViewDef> {
        ViewDef::from_node(node, &self.context(schema_name))
    }

    pub fn hydrate_udt(&self, node: &UdtNode, schema_name: Option<&str>) -> Option<UdtDef> {
        UdtDef::from_node(node, &self.context(schema_name))
    }

    pub fn create_schema(&self, schema: &SchemaDef) -> String {
        let statement = templates::CREATE_SCHEMA.assemble(&Values::new().set("schemaName", quote(&schema.name)));
        Renderable::new(wrap_if_not_exists(&statement, schema.if_not_exist, USER_EXISTS), schema.active).render()
    }
}

/// Terminate `statement`, or wrap it in a PL/SQL block that ignores the
/// "already exists" error `error_code`.
pub fn wrap_if_not_exists(statement: &str, if_not_exist: bool, error_code: u32) -> String {
    let statement = statement.trim().trim_end_matches(';');
    if !if_not_exist {
        return format!("{statement};");
    }
    templates::IF_NOT_EXISTS.assemble(
        &Values::new()
            .set("statement", statement.replace('\'', "''"))
            .set("errorCode", error_code.to_string()),
    )
}

/// `COMMENT ON <object> <name> IS '<text>';`
pub fn comment_statement(object: &str, object_name: &str, text: &str) -> String {
    templates::COMMENT.assemble(
        &Values::new()
            .set("object", object)
            .set("objectName", object_name)
            .set("comment", string_literal(text)),
    )
}

/// Render statement units with the leaf rule and separate them by a blank
/// line, dropping empty ones.
pub(crate) fn join_statements(units: &[Renderable]) -> String {
    units
        .iter()
        .filter(|u| !u.is_empty())
        .map(Renderable::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_schema() {
        let provider = DdlProvider::default();
        let schema = SchemaDef {
            name: "HR".to_string(),
            if_not_exist: false,
            active: true,
        };
        assert_eq!(provider.create_schema(&schema), "CREATE USER \"HR\" NO AUTHENTICATION;");
    }

    #[test]
    fn test_create_schema_if_not_exists() {
        let provider = DdlProvider::default();
        let schema = SchemaDef {
            name: "HR".to_string(),
            if_not_exist: true,
            active: true,
        };
        assert_eq!(
            provider.create_schema(&schema),
            "DECLARE\nBEGIN\n\tEXECUTE IMMEDIATE 'CREATE USER \"HR\" NO AUTHENTICATION';\n\tEXCEPTION WHEN OTHERS THEN\n\t\tIF SQLCODE = -1920 THEN NULL; ELSE RAISE; END IF;\nEND;\n/"
        );
    }

    #[test]
    fn test_inactive_schema_is_commented() {
        let provider = DdlProvider::default();
        let schema = SchemaDef {
            name: "HR".to_string(),
            if_not_exist: false,
            active: false,
        };
        assert_eq!(provider.create_schema(&schema), "-- CREATE USER \"HR\" NO AUTHENTICATION;");
    }

    #[test]
    fn test_wrap_escapes_quotes() {
        let wrapped = wrap_if_not_exists("CREATE VIEW v AS SELECT 'a' FROM dual;", true, OBJECT_EXISTS);
        assert!(wrapped.contains("EXECUTE IMMEDIATE 'CREATE VIEW v AS SELECT ''a'' FROM dual';"));
        assert!(wrapped.contains("SQLCODE = -955"));
    }

    #[test]
    fn test_hydrate_schema_prefers_node_name() {
        let provider = DdlProvider::default();
        let node = ContainerNode {
            name: Some("SALES".to_string()),
            ..Default::default()
        };
        assert_eq!(provider.hydrate_schema("key", &node).name, "SALES");
        assert_eq!(provider.hydrate_schema("key", &ContainerNode::default()).name, "key");
    }

    #[test]
    fn test_comment_statement() {
        assert_eq!(
            comment_statement("TABLE", "\"HR\".\"T\"", "it's"),
            "COMMENT ON TABLE \"HR\".\"T\" IS 'it''s';"
        );
    }
}
