//! Typed projection of modeling-tool schema nodes.
//!
//! These mirror the JSON the tool emits, field for field. Every field is
//! optional and read through [`crate::lenient`], so a sparse or partially
//! malformed node still projects.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::lenient;

pub type Clauses = Vec<Map<String, Value>>;

/// Type-bearing fields shared by columns and user-defined types.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFields {
    #[serde(rename = "$ref", default, deserialize_with = "lenient::string")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub child_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub length: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub max_length: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub precision: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub scale: Option<u32>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub length_semantics: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fract_sec_precision: Option<u32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub with_time_zone: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub local_time_zone: bool,
    #[serde(default, deserialize_with = "lenient::number")]
    pub year_precision: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub day_precision: Option<u32>,
}

/// Options shared by inline and composite key constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOptions {
    #[serde(default, deserialize_with = "lenient::string")]
    pub constraint_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub defer_clause: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub rely: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub index_clause: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub validate: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exception_clause: Option<String>,
}

impl KeyOptions {
    pub fn constraint_name(&self) -> Option<&str> {
        self.constraint_name.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Encryption {
    #[serde(rename = "ENCRYPTION_ALGORITHM", default, deserialize_with = "lenient::string")]
    pub encryption_algorithm: Option<String>,
    #[serde(rename = "INTEGRITY_ALGORITHM", default, deserialize_with = "lenient::string")]
    pub integrity_algorithm: Option<String>,
    #[serde(rename = "noSalt", default, deserialize_with = "lenient::flag")]
    pub no_salt: bool,
}

/// Old or new state of a changed field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSnapshot {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCompMod {
    #[serde(default, deserialize_with = "lenient::object")]
    pub old_field: FieldSnapshot,
    #[serde(default, deserialize_with = "lenient::object")]
    pub new_field: FieldSnapshot,
}

impl FieldCompMod {
    pub fn renamed(&self) -> bool {
        self.old_field.name != self.new_field.name
    }

    pub fn retyped(&self) -> bool {
        self.old_field.kind != self.new_field.kind || self.old_field.mode != self.new_field.mode
    }
}

/// Whole-entity change marker.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCompMod {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub created: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub deleted: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub keyspace_name: Option<String>,
}

/// A column of a table, or an attribute of an object type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
    #[serde(rename = "GUID", default, deserialize_with = "lenient::string")]
    pub guid: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub typing: TypeFields,
    #[serde(default, deserialize_with = "lenient::string")]
    pub of_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub primary_key: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub unique: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub composite_primary_key: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub composite_unique_key: bool,
    #[serde(default, deserialize_with = "lenient::object")]
    pub primary_key_options: KeyOptions,
    #[serde(default, deserialize_with = "lenient::object")]
    pub unique_key_options: KeyOptions,
    #[serde(default, deserialize_with = "lenient::string")]
    pub default: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ref_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub encryption: Option<Encryption>,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub comp_mod: Option<FieldCompMod>,
}

/// Reference to a column, by GUID or by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRef {
    #[serde(default, deserialize_with = "lenient::string")]
    pub key_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub order: Option<String>,
}

/// One entry of a table's `primaryKey` / `uniqueKey` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeKeySpec {
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_primary_key: Vec<KeyRef>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_unique_key: Vec<KeyRef>,
    #[serde(flatten)]
    pub options: KeyOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConstraintSpec {
    #[serde(default, deserialize_with = "lenient::string")]
    pub chk_constr_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub constr_expression: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub constr_comments: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub constr_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexSpec {
    #[serde(rename = "indxName", default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(rename = "indxType", default, deserialize_with = "lenient::string")]
    pub index_type: Option<String>,
    #[serde(rename = "indxKey", default, deserialize_with = "lenient::list")]
    pub keys: Vec<KeyRef>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub column_expression: Clauses,
    #[serde(default, deserialize_with = "lenient::string")]
    pub index_properties: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub logging_clause: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tablespace: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub index_compression: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub index_attributes: Option<String>,
    #[serde(rename = "indxDescription", default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(rename = "isActivated", default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partitioning {
    #[serde(default, deserialize_with = "lenient::string")]
    pub partition_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub partition_key: Vec<KeyRef>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub composite_partition_key: Vec<KeyRef>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subpartition_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub subpartition_key: Vec<KeyRef>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub interval: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub automatic: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub constraint: Option<String>,
    #[serde(rename = "store_in_tablespaces", default, deserialize_with = "lenient::list")]
    pub store_in_tablespaces: Clauses,
    #[serde(rename = "overflow_store_in_tablespaces", default, deserialize_with = "lenient::list")]
    pub overflow_store_in_tablespaces: Clauses,
    #[serde(rename = "range_partitions", default, deserialize_with = "lenient::list")]
    pub range_partitions: Clauses,
    #[serde(rename = "list_partitions", default, deserialize_with = "lenient::list")]
    pub list_partitions: Clauses,
    #[serde(rename = "hash_partition_quantity", default, deserialize_with = "lenient::number")]
    pub hash_partition_quantity: Option<u32>,
    #[serde(rename = "individual_hash_partitions", default, deserialize_with = "lenient::list")]
    pub individual_hash_partitions: Clauses,
    #[serde(rename = "reference_partition_descs", default, deserialize_with = "lenient::list")]
    pub reference_partition_descs: Clauses,
    #[serde(rename = "system_partitioning_quantity", default, deserialize_with = "lenient::number")]
    pub system_partitioning_quantity: Option<u32>,
    #[serde(rename = "system_partition_descs", default, deserialize_with = "lenient::list")]
    pub system_partition_descs: Clauses,
    #[serde(rename = "range_subpartition_descs", default, deserialize_with = "lenient::list")]
    pub range_subpartition_descs: Clauses,
    #[serde(rename = "list_subpartition_descs", default, deserialize_with = "lenient::list")]
    pub list_subpartition_descs: Clauses,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    #[serde(default, deserialize_with = "lenient::string")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tablespace: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub logging: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalLocation {
    #[serde(default, deserialize_with = "lenient::string")]
    pub location_directory: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location_specifier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalTableClause {
    #[serde(default, deserialize_with = "lenient::string")]
    pub access_driver_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub default_directory: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub access_parameter_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub opaque_format_spec: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub clob_subquery: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reject_limit: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub location: Vec<ExternalLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockchainClauses {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub immutable: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub blockchain_table_retention_clause: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub blockchain_row_retention_clause: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub blockchain_hash_and_data_format_clause: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub collection_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::map")]
    pub properties: IndexMap<String, PropertyNode>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub required: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub primary_key: Vec<CompositeKeySpec>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub unique_key: Vec<CompositeKeySpec>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub chk_constr: Vec<CheckConstraintSpec>,
    #[serde(rename = "Indxs", default, deserialize_with = "lenient::list")]
    pub indexes: Vec<IndexSpec>,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub partitioning: Option<Partitioning>,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub storage: Option<Storage>,
    #[serde(rename = "external_table_clause", default, deserialize_with = "lenient::optional_object")]
    pub external_table_clause: Option<ExternalTableClause>,
    #[serde(rename = "blockchain_table_clauses", default, deserialize_with = "lenient::optional_object")]
    pub blockchain_table_clauses: Option<BlockchainClauses>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub temporary: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub temporary_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub sharded: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub duplicated: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub immutable: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub select_statement: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub if_not_exist: bool,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub comp_mod: Option<EntityCompMod>,
}

impl TableNode {
    pub fn entity_name(&self) -> Option<&str> {
        crate::naming::entity_name(
            self.code.as_deref(),
            self.collection_name.as_deref(),
            self.name.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewColumnSpec {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, alias = "entityName", deserialize_with = "lenient::string")]
    pub table_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub alias: Option<String>,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
}

/// A view key: a bare select expression, or a qualified column reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ViewKeySpec {
    Expression(String),
    Column(ViewColumnSpec),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub keys: Vec<ViewKeySpec>,
    #[serde(rename = "or_replace", default, deserialize_with = "lenient::flag")]
    pub or_replace: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub force: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub editionable: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub editioning: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub select_statement: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub if_not_exist: bool,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub comp_mod: Option<EntityCompMod>,
}

/// A model-level definition: object type or collection type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UdtNode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub typing: TypeFields,
    #[serde(default, deserialize_with = "lenient::string")]
    pub of_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size: Option<u32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub not_persistable: bool,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub nullable: bool,
    #[serde(default, deserialize_with = "lenient::map")]
    pub properties: IndexMap<String, PropertyNode>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub required: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub comp_mod: Option<EntityCompMod>,
}

impl UdtNode {
    pub fn type_name(&self) -> Option<&str> {
        self.code.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerNode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub if_not_exist: bool,
    #[serde(default = "lenient::activated", deserialize_with = "lenient::activation")]
    pub is_activated: bool,
}
