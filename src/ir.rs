//! Hydrated view-models: raw schema nodes resolved against their schema
//! context into what the DDL provider renders.

use crate::keys::{self, KeyColumn, KeyConstraint};
use crate::schema::{
    BlockchainClauses, CheckConstraintSpec, Encryption, ExternalTableClause, IndexSpec, KeyOptions, KeyRef,
    Partitioning, PropertyNode, Storage, TableNode, TypeFields, UdtNode, ViewKeySpec, ViewNode,
};
use crate::types::{LengthSemantics, TypeQualifiers, decorate, replace_type_by_version, resolve_column_type};

/// Schema and target version a node is hydrated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaContext {
    pub schema_name: Option<String>,
    pub db_version: Option<String>,
}

impl SchemaContext {
    pub fn new(schema_name: Option<String>, db_version: Option<String>) -> Self {
        Self {
            schema_name,
            db_version,
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }
}

/// Resolve a node's declared type into a native type name plus qualifiers.
/// Qualifiers implied by a foreign type fill the ones the node leaves unset.
pub fn resolve_type(typing: &TypeFields, db_version: Option<&str>) -> (String, TypeQualifiers) {
    let mut qualifiers = TypeQualifiers {
        length: typing.length.or(typing.max_length),
        length_semantics: typing.length_semantics.as_deref().and_then(LengthSemantics::from_str),
        precision: typing.precision,
        scale: typing.scale,
        fract_sec_precision: typing.fract_sec_precision,
        with_time_zone: typing.with_time_zone,
        local_time_zone: typing.local_time_zone,
        year_precision: typing.year_precision,
        day_precision: typing.day_precision,
    };

    if let Some(reference) = typing.reference.as_deref() {
        let name = reference.rsplit('/').next().unwrap_or(reference);
        return (name.to_string(), qualifiers);
    }

    let mode = typing.mode.as_deref().or(typing.child_type.as_deref());
    let resolved = resolve_column_type(mode, typing.kind.as_deref());
    qualifiers.length = qualifiers.length.or(resolved.length);
    qualifiers.precision = qualifiers.precision.or(resolved.precision);
    qualifiers.scale = qualifiers.scale.or(resolved.scale);

    let type_name = replace_type_by_version(&resolved.type_name, db_version).to_string();
    (type_name, qualifiers)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub type_name: String,
    pub qualifiers: TypeQualifiers,
    pub nullable: bool,
    pub default: Option<String>,
    pub encryption: Option<Encryption>,
    pub primary_key: Option<KeyOptions>,
    pub unique: Option<KeyOptions>,
    pub comment: Option<String>,
    pub active: bool,
}

impl ColumnDef {
    /// `required` is the parent's required-name list; a column is nullable
    /// unless listed there.
    pub fn from_property(name: &str, property: &PropertyNode, required: &[String], ctx: &SchemaContext) -> Self {
        let (type_name, qualifiers) = resolve_type(&property.typing, ctx.db_version.as_deref());
        Self {
            name: name.to_string(),
            type_name,
            qualifiers,
            nullable: !required.iter().any(|r| r == name),
            default: property.default.clone(),
            encryption: property.encryption.clone(),
            primary_key: keys::is_inline_primary_key(property).then(|| property.primary_key_options.clone()),
            unique: keys::is_inline_unique(property).then(|| property.unique_key_options.clone()),
            comment: property.ref_description.clone().or_else(|| property.description.clone()),
            active: property.is_activated,
        }
    }

    pub fn type_clause(&self) -> String {
        decorate(&self.type_name, &self.qualifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKind {
    Regular,
    Temporary(String),
    Sharded,
    Duplicated,
    Immutable,
    Blockchain { immutable: bool },
}

impl TableKind {
    pub fn from_node(node: &TableNode) -> Self {
        if node.temporary {
            let scope = node.temporary_type.as_deref().unwrap_or("global").to_ascii_uppercase();
            Self::Temporary(scope)
        } else if node.sharded {
            Self::Sharded
        } else if node.duplicated {
            Self::Duplicated
        } else if node.immutable {
            Self::Immutable
        } else if let Some(blockchain) = &node.blockchain_table_clauses {
            Self::Blockchain {
                immutable: blockchain.immutable,
            }
        } else {
            Self::Regular
        }
    }

    /// Words between `CREATE` and `TABLE`.
    pub fn prefix(&self) -> Option<String> {
        match self {
            Self::Regular => None,
            Self::Temporary(scope) => Some(format!("{scope} TEMPORARY")),
            Self::Sharded => Some("SHARDED".to_string()),
            Self::Duplicated => Some("DUPLICATED".to_string()),
            Self::Immutable => Some("IMMUTABLE".to_string()),
            Self::Blockchain { immutable: true } => Some("IMMUTABLE BLOCKCHAIN".to_string()),
            Self::Blockchain { immutable: false } => Some("BLOCKCHAIN".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PartitioningDef {
    pub spec: Partitioning,
    pub keys: Vec<KeyColumn>,
    pub subpartition_keys: Vec<KeyColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConstraintDef {
    pub name: Option<String>,
    pub expression: String,
    pub description: Option<String>,
}

impl CheckConstraintDef {
    pub fn from_spec(spec: &CheckConstraintSpec) -> Option<Self> {
        let expression = spec.constr_expression.as_deref()?.trim().to_string();
        Some(Self {
            name: spec.chk_constr_name.clone(),
            expression,
            description: spec.constr_description.clone().or_else(|| spec.constr_comments.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDef {
    pub name: Option<String>,
    pub foreign_table: String,
    pub foreign_schema: Option<String>,
    pub foreign_columns: Vec<KeyColumn>,
    pub primary_table: String,
    pub primary_schema: Option<String>,
    pub primary_columns: Vec<KeyColumn>,
    pub foreign_table_active: bool,
    pub primary_table_active: bool,
}

impl ForeignKeyDef {
    pub fn is_active(&self) -> bool {
        self.foreign_table_active
            && self.primary_table_active
            && !keys::all_inactive(&self.foreign_columns)
            && !keys::all_inactive(&self.primary_columns)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKeyDef {
    pub column: KeyColumn,
    pub order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: String,
    pub index_type: Option<String>,
    pub keys: Vec<IndexKeyDef>,
    pub expressions: Vec<String>,
    pub properties: Option<String>,
    pub logging: Option<String>,
    pub tablespace: Option<String>,
    pub compression: Option<String>,
    pub attributes: Option<String>,
    pub active: bool,
}

impl IndexDef {
    pub fn from_spec(spec: &IndexSpec, table: &TableNode) -> Option<Self> {
        let name = spec.name.clone()?;
        let keys = spec
            .keys
            .iter()
            .filter_map(|key| index_key(key, table))
            .collect();
        let expressions = spec
            .column_expression
            .iter()
            .filter_map(|entry| entry.get("value").and_then(|v| v.as_str()))
            .map(str::to_string)
            .collect();
        Some(Self {
            name,
            index_type: spec.index_type.clone(),
            keys,
            expressions,
            properties: spec.index_properties.clone(),
            logging: spec.logging_clause.clone(),
            tablespace: spec.tablespace.clone(),
            compression: spec.index_compression.clone(),
            attributes: spec.index_attributes.clone(),
            active: spec.is_activated,
        })
    }
}

fn index_key(key: &KeyRef, table: &TableNode) -> Option<IndexKeyDef> {
    let column = keys::resolve_key_columns(std::slice::from_ref(key), &table.properties)
        .into_iter()
        .next()
        .or_else(|| key.name.as_deref().map(|name| KeyColumn::new(name, true)))?;
    Some(IndexKeyDef {
        column,
        order: key.order.clone(),
    })
}

#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub schema_name: Option<String>,
    pub columns: Vec<ColumnDef>,
    pub key_constraints: Vec<KeyConstraint>,
    pub check_constraints: Vec<CheckConstraintDef>,
    pub foreign_keys: Vec<ForeignKeyDef>,
    pub kind: TableKind,
    pub storage: Option<Storage>,
    pub external_table: Option<ExternalTableClause>,
    pub blockchain: Option<BlockchainClauses>,
    pub partitioning: Option<PartitioningDef>,
    pub select_statement: Option<String>,
    pub description: Option<String>,
    pub indexes: Vec<IndexDef>,
    pub if_not_exist: bool,
    pub active: bool,
}

impl TableDef {
    /// `None` when the node carries no usable name.
    pub fn from_node(node: &TableNode, ctx: &SchemaContext) -> Option<Self> {
        let name = node.entity_name()?.to_string();
        let columns = node
            .properties
            .iter()
            .map(|(column, property)| ColumnDef::from_property(column, property, &node.required, ctx))
            .collect();
        let partitioning = node.partitioning.clone().map(|spec| {
            let composite = keys::resolve_key_columns(&spec.composite_partition_key, &node.properties);
            let plain = keys::resolve_key_columns(&spec.partition_key, &node.properties);
            let explicit_sub = keys::resolve_key_columns(&spec.subpartition_key, &node.properties);
            let partition_keys = if composite.is_empty() { plain.clone() } else { composite };
            let subpartition_keys = if !explicit_sub.is_empty() {
                explicit_sub
            } else if !plain.is_empty() {
                plain
            } else {
                partition_keys.clone()
            };
            PartitioningDef {
                spec,
                keys: partition_keys,
                subpartition_keys,
            }
        });
        Some(Self {
            name,
            schema_name: ctx.schema_name.clone(),
            columns,
            key_constraints: keys::hydrate_table_keys(node),
            check_constraints: node.chk_constr.iter().filter_map(CheckConstraintDef::from_spec).collect(),
            foreign_keys: Vec::new(),
            kind: TableKind::from_node(node),
            storage: node.storage.clone(),
            external_table: node.external_table_clause.clone(),
            blockchain: node.blockchain_table_clauses.clone(),
            partitioning,
            select_statement: node
                .select_statement
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            description: node.description.clone(),
            indexes: node
                .indexes
                .iter()
                .filter_map(|spec| IndexDef::from_spec(spec, node))
                .collect(),
            if_not_exist: node.if_not_exist,
            active: node.is_activated,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKeyDef {
    Expression(String),
    Column {
        table: Option<String>,
        name: String,
        alias: Option<String>,
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDef {
    pub name: String,
    pub schema_name: Option<String>,
    pub keys: Vec<ViewKeyDef>,
    pub or_replace: bool,
    pub force: bool,
    pub editionable: bool,
    pub editioning: bool,
    pub select_statement: Option<String>,
    pub description: Option<String>,
    pub if_not_exist: bool,
    pub active: bool,
}

impl ViewDef {
    pub fn from_node(node: &ViewNode, ctx: &SchemaContext) -> Option<Self> {
        let name = node.code.clone().or_else(|| node.name.clone())?;
        let keys = node
            .keys
            .iter()
            .filter_map(|key| match key {
                ViewKeySpec::Expression(expr) if !expr.trim().is_empty() => {
                    Some(ViewKeyDef::Expression(expr.trim().to_string()))
                }
                ViewKeySpec::Expression(_) => None,
                ViewKeySpec::Column(column) => Some(ViewKeyDef::Column {
                    table: column.table_name.clone(),
                    name: column.name.clone()?,
                    alias: column.alias.clone(),
                    active: column.is_activated,
                }),
            })
            .collect();
        Some(Self {
            name,
            schema_name: ctx.schema_name.clone(),
            keys,
            or_replace: node.or_replace,
            force: node.force,
            editionable: node.editionable,
            editioning: node.editioning,
            select_statement: node
                .select_statement
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            description: node.description.clone(),
            if_not_exist: node.if_not_exist,
            active: node.is_activated,
        })
    }

    pub fn has_body(&self) -> bool {
        self.select_statement.is_some() || !self.keys.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Varray,
    Table,
}

impl CollectionKind {
    pub fn from_str(s: &str) -> Self {
        if s.to_ascii_lowercase().contains("varray") {
            Self::Varray
        } else {
            Self::Table
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Varray => "VARRAY",
            Self::Table => "TABLE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UdtKind {
    Object {
        attributes: Vec<ColumnDef>,
    },
    Collection {
        collection: CollectionKind,
        size: Option<u32>,
        element_type: String,
        element_nullable: bool,
        not_persistable: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UdtDef {
    pub name: String,
    pub schema_name: Option<String>,
    pub kind: UdtKind,
    pub active: bool,
}

impl UdtDef {
    pub fn from_node(node: &UdtNode, ctx: &SchemaContext) -> Option<Self> {
        let name = node.type_name()?.to_string();
        let child_type = node.typing.child_type.as_deref().unwrap_or_default();
        let is_object = match child_type {
            "object_udt" => true,
            "collection_udt" => false,
            _ => node.of_type.is_none(),
        };
        let kind = if is_object {
            UdtKind::Object {
                attributes: node
                    .properties
                    .iter()
                    .map(|(attr, property)| ColumnDef::from_property(attr, property, &node.required, ctx))
                    .collect(),
            }
        } else {
            let element = TypeFields {
                mode: node.of_type.clone(),
                kind: None,
                child_type: None,
                reference: None,
                ..node.typing.clone()
            };
            let (element_type, qualifiers) = resolve_type(&element, ctx.db_version.as_deref());
            UdtKind::Collection {
                collection: CollectionKind::from_str(node.typing.mode.as_deref().unwrap_or_default()),
                size: node.size,
                element_type: decorate(&element_type, &qualifiers),
                element_nullable: node.nullable,
                not_persistable: node.not_persistable,
            }
        };
        Some(Self {
            name,
            schema_name: ctx.schema_name.clone(),
            kind,
            active: node.is_activated,
        })
    }
}

/// A schema (Oracle user) to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDef {
    pub name: String,
    pub if_not_exist: bool,
    pub active: bool,
}
