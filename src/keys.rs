//! Primary and unique key derivation.

use indexmap::IndexMap;

use crate::activation::Renderable;
use crate::naming::quote;
use crate::schema::{KeyOptions, KeyRef, PropertyNode, TableNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    PrimaryKey,
    Unique,
}

impl KeyKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
        }
    }
}

/// A member column of a key, with its own activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    pub name: String,
    pub active: bool,
}

impl KeyColumn {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            active,
        }
    }

    pub fn quoted(&self) -> Renderable {
        Renderable::new(quote(&self.name), self.active)
    }
}

pub fn all_inactive(columns: &[KeyColumn]) -> bool {
    !columns.is_empty() && columns.iter().all(|c| !c.active)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConstraint {
    pub kind: KeyKind,
    pub columns: Vec<KeyColumn>,
    pub options: KeyOptions,
}

impl KeyConstraint {
    /// Live unless every member column is deactivated.
    pub fn is_active(&self) -> bool {
        !all_inactive(&self.columns)
    }
}

/// Inline PRIMARY KEY applies only outside composite keys.
pub fn is_inline_primary_key(column: &PropertyNode) -> bool {
    column.primary_key && !column.composite_primary_key && !column.composite_unique_key
}

/// Inline UNIQUE applies outside composite unique keys and never together
/// with an inline primary key.
pub fn is_inline_unique(column: &PropertyNode) -> bool {
    column.unique && !column.composite_unique_key && !is_inline_primary_key(column)
}

/// Resolve key references against the column map. References match a
/// column GUID first, then a column name; unresolved ones are dropped.
pub fn resolve_key_columns(refs: &[KeyRef], properties: &IndexMap<String, PropertyNode>) -> Vec<KeyColumn> {
    refs.iter()
        .filter_map(|key| {
            let by_id = key.key_id.as_deref().and_then(|id| {
                properties
                    .iter()
                    .find(|(_, p)| p.guid.as_deref() == Some(id))
            });
            let by_name = || {
                key.name
                    .as_deref()
                    .and_then(|name| properties.get_key_value(name))
            };
            match by_id.or_else(by_name) {
                Some((name, column)) => Some(KeyColumn::new(name.clone(), column.is_activated)),
                None => {
                    tracing::warn!(
                        target: "oraddl::hydrate",
                        key_id = ?key.key_id,
                        name = ?key.name,
                        "key reference does not match any column"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Composite primary keys, then composite unique keys, in declaration
/// order. Keys whose members are all inactive are kept; the renderer
/// comments them out.
pub fn hydrate_table_keys(table: &TableNode) -> Vec<KeyConstraint> {
    if table.properties.is_empty() {
        return Vec::new();
    }
    let primary = table
        .primary_key
        .iter()
        .filter(|spec| !spec.composite_primary_key.is_empty())
        .map(|spec| KeyConstraint {
            kind: KeyKind::PrimaryKey,
            columns: resolve_key_columns(&spec.composite_primary_key, &table.properties),
            options: spec.options.clone(),
        });
    let unique = table
        .unique_key
        .iter()
        .filter(|spec| !spec.composite_unique_key.is_empty())
        .map(|spec| KeyConstraint {
            kind: KeyKind::Unique,
            columns: resolve_key_columns(&spec.composite_unique_key, &table.properties),
            options: spec.options.clone(),
        });
    primary
        .chain(unique)
        .filter(|key| !key.columns.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: serde_json::Value) -> TableNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_inline_flags() {
        let pk: PropertyNode = serde_json::from_value(json!({ "primaryKey": true, "unique": true })).unwrap();
        assert!(is_inline_primary_key(&pk));
        assert!(!is_inline_unique(&pk));

        let composite: PropertyNode =
            serde_json::from_value(json!({ "primaryKey": true, "compositePrimaryKey": true })).unwrap();
        assert!(!is_inline_primary_key(&composite));

        let unique: PropertyNode = serde_json::from_value(json!({ "unique": true })).unwrap();
        assert!(is_inline_unique(&unique));
    }

    #[test]
    fn test_composite_keys_resolve_by_guid() {
        let t = table(json!({
            "properties": {
                "a": { "GUID": "ga" },
                "b": { "GUID": "gb", "isActivated": false }
            },
            "primaryKey": [{ "constraintName": "pk_ab", "compositePrimaryKey": [{ "keyId": "ga" }, { "keyId": "gb" }] }],
            "uniqueKey": [{ "compositeUniqueKey": [{ "keyId": "gb" }] }]
        }));
        let keys = hydrate_table_keys(&t);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].kind, KeyKind::PrimaryKey);
        assert_eq!(keys[0].options.constraint_name(), Some("pk_ab"));
        assert_eq!(keys[0].columns, vec![KeyColumn::new("a", true), KeyColumn::new("b", false)]);
        assert!(keys[0].is_active());
        assert_eq!(keys[1].kind, KeyKind::Unique);
        assert!(!keys[1].is_active());
    }

    #[test]
    fn test_unresolved_references_are_dropped() {
        let t = table(json!({
            "properties": { "a": { "GUID": "ga" } },
            "primaryKey": [{ "compositePrimaryKey": [{ "keyId": "missing" }] }]
        }));
        assert!(hydrate_table_keys(&t).is_empty());
    }

    #[test]
    fn test_reference_by_name() {
        let props: IndexMap<String, PropertyNode> =
            serde_json::from_value(json!({ "x": {}, "y": { "isActivated": false } })).unwrap();
        let refs: Vec<KeyRef> = serde_json::from_value(json!([{ "name": "y" }])).unwrap();
        assert_eq!(resolve_key_columns(&refs, &props), vec![KeyColumn::new("y", false)]);
    }
}
