use oraddl::{GenerateError, GenerateOptions, generate_script, generate_script_from_str};
use serde_json::{Value, json};

fn script(delta: Value) -> String {
    generate_script(&delta, &GenerateOptions::with_db_version("19c")).unwrap()
}

#[test]
fn test_added_table_lists_columns_in_declaration_order() {
    let out = script(json!({
        "entities": { "added": { "items": [{ "t1": {
            "collectionName": "T",
            "compMod": { "created": true },
            "properties": {
                "zeta": { "type": "number" },
                "alpha": { "type": "string" },
                "mid": { "type": "date" }
            }
        } }] } }
    }));
    assert_eq!(
        out,
        "CREATE TABLE \"T\"\n(\n\t\"zeta\" NUMERIC,\n\t\"alpha\" NVARCHAR2,\n\t\"mid\" DATE\n);"
    );
    assert_eq!(out.matches("CREATE TABLE").count(), 1);
}

#[test]
fn test_rename_precedes_retype() {
    let out = script(json!({
        "entities": { "modified": { "items": [{ "t1": {
            "collectionName": "T",
            "compMod": {},
            "properties": {
                "b": { "compMod": {
                    "oldField": { "name": "a", "type": "numeric", "mode": "number" },
                    "newField": { "name": "b", "type": "char", "mode": "varchar2" }
                } }
            }
        } }] } }
    }));
    let rename = out.find("ALTER TABLE \"T\" RENAME COLUMN \"a\" TO \"b\";").unwrap();
    let modify = out.find("ALTER TABLE \"T\" MODIFY (\"b\" VARCHAR2);").unwrap();
    assert!(rename < modify);
}

#[test]
fn test_udt_attribute_add_precedes_drop() {
    let out = script(json!({
        "modelDefinitions": {
            "deleted": { "items": [{ "u": {
                "code": "point_t",
                "childType": "object_udt",
                "properties": { "z": { "mode": "number" } }
            } }] },
            "added": { "items": [{ "u": {
                "code": "point_t",
                "childType": "object_udt",
                "properties": { "w": { "mode": "number" } }
            } }] }
        }
    }));
    assert_eq!(
        out,
        "ALTER TYPE \"point_t\" ADD ATTRIBUTE \"w\" NUMBER;\n\nALTER TYPE \"point_t\" DROP ATTRIBUTE \"z\";"
    );
}

#[test]
fn test_inactive_composite_key_is_one_trailing_comment() {
    let out = script(json!({
        "entities": { "added": { "items": [{ "t1": {
            "collectionName": "T",
            "compMod": { "created": true, "keyspaceName": "HR" },
            "properties": {
                "a": { "GUID": "ga", "mode": "number", "isActivated": false },
                "b": { "GUID": "gb", "mode": "number", "isActivated": false },
                "c": { "GUID": "gc", "mode": "number" }
            },
            "primaryKey": [{
                "compositePrimaryKey": [{ "keyId": "ga" }, { "keyId": "gb" }],
                "constraintName": "pk_t"
            }]
        } }] } }
    }));
    assert_eq!(
        out,
        "CREATE TABLE \"HR\".\"T\"\n(\n\t\"c\" NUMBER\n\t/* \"a\" NUMBER,\n\t\"b\" NUMBER,\n\tCONSTRAINT \"pk_t\" PRIMARY KEY (\"a\", \"b\") */\n);"
    );
}

#[test]
fn test_full_model_script() {
    let out = script(json!({
        "properties": {
            "containers": { "properties": {
                "added": { "items": { "properties": { "HR": { "ifNotExist": false } } } }
            } },
            "entities": { "properties": {
                "added": { "items": [
                    { "properties": { "t1": {
                        "code": "employees",
                        "compMod": { "created": true, "keyspaceName": "HR" },
                        "properties": {
                            "id": { "mode": "number", "precision": 10, "primaryKey": true },
                            "salary": { "mode": "number", "precision": 8, "scale": 2 },
                            "profile": { "mode": "json", "description": "free-form" }
                        },
                        "required": ["id"],
                        "description": "staff"
                    } } }
                ] },
                "deleted": { "items": [{ "properties": { "t2": {
                    "code": "legacy",
                    "compMod": { "deleted": true, "keyspaceName": "HR" }
                } } }] }
            } },
            "views": { "properties": {
                "added": { "items": [{ "properties": { "v1": {
                    "code": "v_staff",
                    "compMod": { "created": true, "keyspaceName": "HR" },
                    "or_replace": true,
                    "keys": [{ "name": "id", "entityName": "employees" }]
                } } }] }
            } }
        }
    }));
    assert_eq!(
        out,
        "CREATE USER \"HR\" NO AUTHENTICATION;\n\n\
         CREATE TABLE \"HR\".\"employees\"\n(\n\t\"id\" NUMBER(10) NOT NULL PRIMARY KEY,\n\t\"salary\" NUMBER(8,2),\n\t\"profile\" CLOB\n);\n\n\
         COMMENT ON TABLE \"HR\".\"employees\" IS 'staff';\n\n\
         COMMENT ON COLUMN \"HR\".\"employees\".\"profile\" IS 'free-form';\n\n\
         DROP TABLE \"HR\".\"legacy\";\n\n\
         CREATE OR REPLACE VIEW \"HR\".\"v_staff\"\n\tAS SELECT \"HR\".\"employees\".\"id\"\n\tFROM \"HR\".\"employees\";"
    );
}

#[test]
fn test_json_kept_on_21c() {
    let delta = json!({
        "entities": { "added": { "items": [{ "t1": {
            "collectionName": "docs",
            "compMod": { "created": true },
            "properties": { "body": { "mode": "json" } }
        } }] } }
    });
    let modern = generate_script(&delta, &GenerateOptions::with_db_version("21c")).unwrap();
    assert!(modern.contains("\"body\" JSON"));
    let legacy = generate_script(&delta, &GenerateOptions::default()).unwrap();
    assert!(legacy.contains("\"body\" CLOB"));
}

#[test]
fn test_generation_is_deterministic() {
    let delta = json!({
        "containers": { "added": { "items": [{ "A": {} }, { "B": {} }] } },
        "entities": { "added": { "items": [{ "t1": {
            "collectionName": "T",
            "compMod": { "created": true },
            "properties": { "x": { "mode": "number" }, "y": { "mode": "date" } },
            "Indxs": [{ "indxName": "ix", "indxKey": [{ "name": "y" }] }]
        } }] } }
    })
    .to_string();
    let options = GenerateOptions::default();
    let first = generate_script_from_str(&delta, &options).unwrap();
    let second = generate_script_from_str(&delta, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unparseable_document() {
    let err = generate_script_from_str("{\"entities\": ", &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidDocument(_)));
}
