use tracing::warn;

use super::field_type;
use crate::activation::Renderable;
use crate::ddl::DdlProvider;
use crate::delta::{Change, Delta, Item, Section};
use crate::ir::{ColumnDef, UdtDef, UdtKind};
use crate::naming::{qualified, quote};
use crate::schema::UdtNode;
use crate::template::Values;
use crate::templates;

fn types<'a>(items: &'a [Item], change: Change) -> impl Iterator<Item = Delta<UdtNode>> + 'a {
    items
        .iter()
        .filter_map(Item::project::<UdtNode>)
        .filter(move |delta| delta.change == change)
}

fn hydrate(provider: &DdlProvider, delta: &Delta<UdtNode>) -> Option<UdtDef> {
    let udt = provider.hydrate_udt(&delta.node, delta.schema_name.as_deref());
    if udt.is_none() {
        warn!(target: "oraddl::hydrate", item = %delta.key, "type without a name");
    }
    udt
}

/// Object types only: collection types have no attributes to alter.
fn object_type(provider: &DdlProvider, delta: &Delta<UdtNode>) -> Option<(String, UdtDef)> {
    let udt = hydrate(provider, delta)?;
    if !matches!(udt.kind, UdtKind::Object { .. }) {
        return None;
    }
    Some((qualified(&udt.name, udt.schema_name.as_deref()), udt))
}

fn attribute_statement(name: &str, attribute: String) -> String {
    templates::ADD_ATTRIBUTE.assemble(&Values::new().set("name", name).set("attribute", attribute))
}

fn drop_attribute(name: &str, attribute: &str) -> String {
    templates::DROP_ATTRIBUTE.assemble(&Values::new().set("name", name).set("attribute", quote(attribute)))
}

fn add_attributes(provider: &DdlProvider, delta: &Delta<UdtNode>) -> Vec<String> {
    let Some((name, udt)) = object_type(provider, delta) else {
        return Vec::new();
    };
    let UdtKind::Object { attributes } = &udt.kind else {
        return Vec::new();
    };
    delta
        .node
        .properties
        .values()
        .zip(attributes)
        .filter(|(property, _)| property.comp_mod.is_none())
        .map(|(_, attribute)| {
            let statement = attribute_statement(&name, provider.attribute_renderable(attribute).text);
            Renderable::new(statement, attribute.active && udt.active).render()
        })
        .collect()
}

fn drop_attributes(provider: &DdlProvider, delta: &Delta<UdtNode>) -> Vec<String> {
    let Some((name, _)) = object_type(provider, delta) else {
        return Vec::new();
    };
    delta
        .node
        .properties
        .iter()
        .filter(|(_, property)| property.comp_mod.is_none())
        .map(|(attribute, _)| drop_attribute(&name, attribute))
        .collect()
}

/// A rename drops the old attribute and adds the new one with its current
/// type; type changes follow all renames.
fn modify_attributes(provider: &DdlProvider, delta: &Delta<UdtNode>) -> Vec<String> {
    let Some((name, udt)) = object_type(provider, delta) else {
        return Vec::new();
    };
    let UdtKind::Object { attributes } = &udt.kind else {
        return Vec::new();
    };
    let changes: Vec<_> = delta
        .node
        .properties
        .iter()
        .zip(attributes)
        .filter_map(|((key, property), attribute)| property.comp_mod.as_ref().map(|c| (key, c, attribute)))
        .collect();

    let mut statements = Vec::new();
    for (_, change, attribute) in changes.iter().filter(|(_, c, _)| c.renamed()) {
        let (Some(old), Some(new)) = (change.old_field.name.as_deref(), change.new_field.name.as_deref()) else {
            continue;
        };
        let mut renamed = ColumnDef::clone(attribute);
        renamed.name = new.to_string();
        statements.push(drop_attribute(&name, old));
        statements.push(attribute_statement(&name, provider.attribute_renderable(&renamed).text));
    }
    for (key, change, _) in changes.iter().filter(|(_, c, _)| c.retyped()) {
        let Some(type_name) = field_type(&change.new_field) else {
            warn!(target: "oraddl::hydrate", attribute = %key, "type change without a new type");
            continue;
        };
        statements.push(templates::MODIFY_ATTRIBUTE.assemble(
            &Values::new()
                .set("name", name.clone())
                .set("attribute", quote(key))
                .set("type", type_name),
        ));
    }
    statements
}

/// Deleted types, created types, then attribute additions, removals and
/// changes on existing object types.
pub(super) fn scripts(section: &Section, provider: &DdlProvider) -> Vec<String> {
    let deleted: Vec<String> = types(&section.deleted, Change::Deleted)
        .filter_map(|delta| hydrate(provider, &delta))
        .map(|udt| {
            templates::DROP_TYPE
                .assemble(&Values::new().set("name", qualified(&udt.name, udt.schema_name.as_deref())))
        })
        .collect();
    let created: Vec<String> = types(&section.added, Change::Created)
        .filter_map(|delta| hydrate(provider, &delta))
        .map(|udt| provider.create_udt(&udt))
        .collect();
    let added: Vec<String> = types(&section.added, Change::Fields)
        .flat_map(|delta| add_attributes(provider, &delta))
        .collect();
    let dropped: Vec<String> = types(&section.deleted, Change::Fields)
        .flat_map(|delta| drop_attributes(provider, &delta))
        .collect();
    let modified: Vec<String> = types(&section.modified, Change::Fields)
        .flat_map(|delta| modify_attributes(provider, &delta))
        .collect();

    [deleted, created, added, dropped, modified]
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaDocument;
    use serde_json::json;

    fn run(doc: serde_json::Value) -> Vec<String> {
        let doc = DeltaDocument::from_value(&doc).unwrap();
        scripts(&doc.model_definitions, &DdlProvider::default())
    }

    #[test]
    fn test_add_before_delete_attribute() {
        let scripts = run(json!({
            "modelDefinitions": {
                "deleted": { "items": [{ "d1": {
                    "name": "address_t",
                    "childType": "object_udt",
                    "properties": { "fax": { "mode": "varchar2", "length": 20 } }
                } }] },
                "added": { "items": [{ "d1": {
                    "name": "address_t",
                    "childType": "object_udt",
                    "properties": { "email": { "mode": "varchar2", "length": 100 } }
                } }] }
            }
        }));
        assert_eq!(
            scripts,
            vec![
                "ALTER TYPE \"address_t\" ADD ATTRIBUTE \"email\" VARCHAR2(100);".to_string(),
                "ALTER TYPE \"address_t\" DROP ATTRIBUTE \"fax\";".to_string(),
            ]
        );
    }

    #[test]
    fn test_rename_and_retype_attribute() {
        let scripts = run(json!({
            "modelDefinitions": { "modified": { "items": [{ "d1": {
                "name": "address_t",
                "childType": "object_udt",
                "properties": {
                    "zip_code": {
                        "mode": "varchar2",
                        "length": 10,
                        "compMod": {
                            "oldField": { "name": "zip", "type": "numeric", "mode": "number" },
                            "newField": { "name": "zip_code", "type": "char", "mode": "varchar2" }
                        }
                    }
                }
            } }] } }
        }));
        assert_eq!(
            scripts,
            vec![
                "ALTER TYPE \"address_t\" DROP ATTRIBUTE \"zip\";".to_string(),
                "ALTER TYPE \"address_t\" ADD ATTRIBUTE \"zip_code\" VARCHAR2(10);".to_string(),
                "ALTER TYPE \"address_t\" MODIFY ATTRIBUTE \"zip_code\" VARCHAR2;".to_string(),
            ]
        );
    }

    #[test]
    fn test_collection_types_have_no_attribute_phases() {
        let scripts = run(json!({
            "modelDefinitions": {
                "added": { "items": [{ "d1": {
                    "name": "phones_t",
                    "childType": "collection_udt",
                    "mode": "varray",
                    "ofType": "varchar2",
                    "properties": { "x": { "mode": "number" } }
                } }] }
            }
        }));
        assert!(scripts.is_empty());
    }

    #[test]
    fn test_delete_before_create() {
        let scripts = run(json!({
            "modelDefinitions": {
                "added": { "items": [{ "d2": {
                    "name": "ids_t",
                    "childType": "collection_udt",
                    "mode": "table",
                    "ofType": "number",
                    "compMod": { "created": true }
                } }] },
                "deleted": { "items": [{ "d1": { "name": "old_t", "compMod": { "deleted": true } } }] }
            }
        }));
        assert_eq!(
            scripts,
            vec![
                "DROP TYPE \"old_t\";".to_string(),
                "CREATE OR REPLACE TYPE \"ids_t\" IS TABLE OF (NUMBER);".to_string(),
            ]
        );
    }
}
