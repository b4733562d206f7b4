use super::DdlProvider;
use crate::activation::{Renderable, join_members};
use crate::ir::{CollectionKind, UdtDef, UdtKind};
use crate::naming::qualified;
use crate::template::Values;
use crate::templates;

const DEFAULT_VARRAY_SIZE: u32 = 64;

impl DdlProvider {
    /// `CREATE OR REPLACE TYPE` for an object or collection type.
    pub fn create_udt(&self, udt: &UdtDef) -> String {
        let name = qualified(&udt.name, udt.schema_name.as_deref());
        let text = match &udt.kind {
            UdtKind::Object { attributes } => {
                let members: Vec<Renderable> = attributes.iter().map(|a| self.attribute_renderable(a)).collect();
                templates::CREATE_OBJECT_TYPE.assemble(
                    &Values::new()
                        .set("name", name)
                        .set("properties", join_members(&members, ",\n\t", udt.active)),
                )
            }
            UdtKind::Collection {
                collection,
                size,
                element_type,
                element_nullable,
                not_persistable,
            } => {
                let size = match (collection, size) {
                    (_, Some(size)) => Some(size.to_string()),
                    (CollectionKind::Varray, None) => Some(DEFAULT_VARRAY_SIZE.to_string()),
                    (CollectionKind::Table, None) => None,
                };
                let datatype = if *element_nullable {
                    element_type.clone()
                } else {
                    format!("{element_type} NOT NULL")
                };
                templates::CREATE_COLLECTION_TYPE.assemble(
                    &Values::new()
                        .set("name", name)
                        .set("collectionType", collection.keyword())
                        .opt("size", size)
                        .set("datatype", datatype)
                        .flag("notPersistable", *not_persistable, "NOT PERSISTABLE"),
                )
            }
        };
        Renderable::new(text, udt.active).render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SchemaContext;
    use crate::schema::UdtNode;
    use serde_json::json;

    fn hydrate(value: serde_json::Value) -> UdtDef {
        let node: UdtNode = serde_json::from_value(value).unwrap();
        UdtDef::from_node(&node, &SchemaContext::new(Some("HR".to_string()), None)).unwrap()
    }

    #[test]
    fn test_object_type() {
        let provider = DdlProvider::default();
        let udt = hydrate(json!({
            "name": "address_t",
            "childType": "object_udt",
            "properties": {
                "street": { "mode": "varchar2", "length": 100 },
                "zip": { "mode": "char", "length": 5 }
            }
        }));
        assert_eq!(
            provider.create_udt(&udt),
            "CREATE OR REPLACE TYPE \"HR\".\"address_t\" AS OBJECT\n(\n\t\"street\" VARCHAR2(100),\n\t\"zip\" CHAR(5)\n);"
        );
    }

    #[test]
    fn test_object_type_with_inactive_attribute() {
        let provider = DdlProvider::default();
        let udt = hydrate(json!({
            "name": "point_t",
            "properties": {
                "x": { "mode": "number" },
                "y": { "mode": "number", "isActivated": false }
            }
        }));
        assert_eq!(
            provider.create_udt(&udt),
            "CREATE OR REPLACE TYPE \"HR\".\"point_t\" AS OBJECT\n(\n\t\"x\" NUMBER\n\t/* \"y\" NUMBER */\n);"
        );
    }

    #[test]
    fn test_varray_defaults_size() {
        let provider = DdlProvider::default();
        let udt = hydrate(json!({
            "name": "phones_t",
            "childType": "collection_udt",
            "mode": "varray",
            "ofType": "varchar2",
            "length": 20,
            "nullable": false
        }));
        assert_eq!(
            provider.create_udt(&udt),
            "CREATE OR REPLACE TYPE \"HR\".\"phones_t\" IS VARRAY(64) OF (VARCHAR2(20) NOT NULL);"
        );
    }

    #[test]
    fn test_nested_table_not_persistable() {
        let provider = DdlProvider::default();
        let udt = UdtDef {
            name: "ids_t".to_string(),
            schema_name: None,
            kind: UdtKind::Collection {
                collection: CollectionKind::Table,
                size: None,
                element_type: "NUMBER".to_string(),
                element_nullable: true,
                not_persistable: true,
            },
            active: false,
        };
        assert_eq!(
            provider.create_udt(&udt),
            "-- CREATE OR REPLACE TYPE \"ids_t\" IS TABLE OF (NUMBER) NOT PERSISTABLE;"
        );
    }
}
