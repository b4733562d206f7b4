//! Delta documents: the diff tree the alter-script generator reduces.
//!
//! The modeling tool emits the tree either flat
//! (`{ entities: { added: { items: [...] } } }`) or in JSON-schema form
//! where every level sits under `properties`. Both are read here, and each
//! item is projected into a typed [`Delta`] carrying its change marker.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::schema::EntityCompMod;

/// Entity-level change recorded on a node's `compMod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created,
    Deleted,
    /// A `compMod` is present but marks neither creation nor deletion.
    Marked,
    /// No entity-level marker: only some fields changed.
    Fields,
}

impl Change {
    fn from_comp_mod(comp_mod: Option<&EntityCompMod>) -> Self {
        match comp_mod {
            None => Self::Fields,
            Some(c) if c.created => Self::Created,
            Some(c) if c.deleted => Self::Deleted,
            Some(_) => Self::Marked,
        }
    }
}

/// One item of a delta section: the entity id and its raw node.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub key: String,
    pub node: Value,
}

impl Item {
    fn from_value(value: &Value) -> Option<Self> {
        let map = match value.as_object()? {
            wrapped if wrapped.len() == 1 => wrapped
                .get("properties")
                .and_then(Value::as_object)
                .unwrap_or(wrapped),
            map => map,
        };
        let (key, node) = map.iter().next()?;
        Some(Self {
            key: key.clone(),
            node: node.clone(),
        })
    }

    /// The node with its `role` overlay applied, minus the overlay's own
    /// `properties`.
    pub fn merged(&self) -> Value {
        let Value::Object(node) = &self.node else {
            return self.node.clone();
        };
        let mut merged = node.clone();
        if let Some(role) = node.get("role").and_then(Value::as_object) {
            for (key, value) in role {
                if key != "properties" {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Value::Object(merged)
    }

    fn comp_mod(node: &Value) -> Option<EntityCompMod> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Marker {
            #[serde(default, deserialize_with = "crate::lenient::optional_object")]
            comp_mod: Option<EntityCompMod>,
        }
        serde_json::from_value::<Marker>(node.clone()).ok()?.comp_mod
    }

    /// Typed projection of the merged node. Nodes that fail projection are
    /// logged and skipped.
    pub fn project<T: DeserializeOwned>(&self) -> Option<Delta<T>> {
        let merged = self.merged();
        let change = Change::from_comp_mod(Self::comp_mod(&self.node).as_ref());
        let schema_name = Self::comp_mod(&merged).and_then(|c| c.keyspace_name);
        match serde_json::from_value::<T>(merged) {
            Ok(node) => Some(Delta {
                key: self.key.clone(),
                change,
                schema_name,
                node,
            }),
            Err(err) => {
                tracing::warn!(target: "oraddl::hydrate", item = %self.key, error = %err, "skipping unreadable delta item");
                None
            }
        }
    }
}

/// A typed entity together with what happened to it.
#[derive(Debug, Clone)]
pub struct Delta<T> {
    pub key: String,
    pub change: Change,
    pub schema_name: Option<String>,
    pub node: T,
}

/// The added, deleted and modified items of one entity category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub added: Vec<Item>,
    pub deleted: Vec<Item>,
    pub modified: Vec<Item>,
}

impl Section {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        Self {
            added: items(child(value, "added")),
            deleted: items(child(value, "deleted")),
            modified: items(child(value, "modified")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaDocument {
    pub containers: Section,
    pub entities: Section,
    pub views: Section,
    pub model_definitions: Section,
}

impl DeltaDocument {
    /// Read a delta tree; `None` when the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            containers: Section::from_value(child(value, "containers")),
            entities: Section::from_value(child(value, "entities")),
            views: Section::from_value(child(value, "views")),
            model_definitions: Section::from_value(child(value, "modelDefinitions")),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `key` directly on `value`, or under its `properties`.
fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map: &Map<String, Value> = value.as_object()?;
    map.get(key)
        .or_else(|| map.get("properties")?.as_object()?.get(key))
}

/// `items` may be an array or a lone object.
fn items(section: Option<&Value>) -> Vec<Item> {
    let Some(items) = section.and_then(|s| child(s, "items")) else {
        return Vec::new();
    };
    match items {
        Value::Array(list) => list.iter().filter_map(Item::from_value).collect(),
        Value::Object(_) => Item::from_value(items).into_iter().collect(),
        _ => Vec::new(),
    }
}
