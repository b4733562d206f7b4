use crate::ddl::DdlProvider;
use crate::delta::{Item, Section};
use crate::ir::SchemaDef;
use crate::naming::quote;
use crate::schema::ContainerNode;
use crate::template::Values;
use crate::templates;

fn drop_schema(schema: &SchemaDef) -> String {
    templates::DROP_USER.assemble(&Values::new().set("name", quote(&schema.name)))
}

/// Added schemas are created, deleted ones dropped, creates first.
pub(super) fn scripts(section: &Section, provider: &DdlProvider) -> Vec<String> {
    let hydrate = |item: &Item| {
        item.project::<ContainerNode>()
            .map(|delta| provider.hydrate_schema(&delta.key, &delta.node))
    };
    let created = section
        .added
        .iter()
        .filter_map(hydrate)
        .map(|schema| provider.create_schema(&schema));
    let dropped = section.deleted.iter().filter_map(hydrate).map(|schema| drop_schema(&schema));
    created.chain(dropped).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaDocument;
    use serde_json::json;

    #[test]
    fn test_create_then_drop() {
        let doc = DeltaDocument::from_value(&json!({
            "containers": {
                "deleted": { "items": [{ "OLD": {} }] },
                "added": { "items": [{ "NEW": { "ifNotExist": true } }, { "key": { "name": "SALES" } }] }
            }
        }))
        .unwrap();
        let scripts = scripts(&doc.containers, &DdlProvider::default());
        assert_eq!(scripts.len(), 3);
        assert!(scripts[0].starts_with("DECLARE\nBEGIN\n\tEXECUTE IMMEDIATE 'CREATE USER \"NEW\" NO AUTHENTICATION';"));
        assert_eq!(scripts[1], "CREATE USER \"SALES\" NO AUTHENTICATION;");
        assert_eq!(scripts[2], "DROP USER \"OLD\";");
    }
}
