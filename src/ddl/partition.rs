//! `PARTITION BY` clause assembly.

use serde_json::Value;

use crate::activation::column_list;
use crate::ir::PartitioningDef;
use crate::keys::KeyColumn;
use crate::schema::Clauses;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionBy {
    Range,
    List,
    Hash,
    Reference,
    System,
    CompositeRange,
    CompositeList,
    CompositeHash,
}

impl PartitionBy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "range" => Some(Self::Range),
            "list" => Some(Self::List),
            "hash" => Some(Self::Hash),
            "reference" => Some(Self::Reference),
            "system" => Some(Self::System),
            "composite range" => Some(Self::CompositeRange),
            "composite list" => Some(Self::CompositeList),
            "composite hash" => Some(Self::CompositeHash),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Range | Self::CompositeRange => "RANGE",
            Self::List | Self::CompositeList => "LIST",
            Self::Hash | Self::CompositeHash => "HASH",
            Self::Reference => "REFERENCE",
            Self::System => "SYSTEM",
        }
    }
}

fn clause_values<'a>(entries: &'a Clauses, key: &str) -> Vec<&'a str> {
    entries
        .iter()
        .filter_map(|entry| entry.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Partition descriptions as a parenthesised block, one per line.
fn partition_list(entries: &Clauses, key: &str) -> String {
    let values = clause_values(entries, key);
    if values.is_empty() {
        return String::new();
    }
    format!("\n(\n\t{}\n)", values.join(",\n\t"))
}

fn tablespace_list(entries: &Clauses, word: Option<&str>, key: &str) -> String {
    let values = clause_values(entries, key);
    if values.is_empty() {
        return String::new();
    }
    let word = word.map(|w| format!(" {w}")).unwrap_or_default();
    format!("{word} STORE IN ({})", values.join(", "))
}

fn key_list(keys: &[KeyColumn], parent_active: bool) -> String {
    if keys.is_empty() {
        return String::new();
    }
    let columns: Vec<_> = keys.iter().map(KeyColumn::quoted).collect();
    format!(" {}", column_list(&columns, parent_active))
}

fn interval(def: &PartitioningDef) -> String {
    def.spec
        .interval
        .as_deref()
        .map(|i| format!(" INTERVAL ({i})"))
        .unwrap_or_default()
}

fn hash_partitions(def: &PartitioningDef) -> String {
    let spec = &def.spec;
    match spec.hash_partition_quantity {
        Some(quantity) => format!(
            " PARTITIONS {quantity}{}{}",
            tablespace_list(&spec.store_in_tablespaces, None, "store_in_tablespace"),
            tablespace_list(
                &spec.overflow_store_in_tablespaces,
                Some("OVERFLOW"),
                "overflow_store_in_tablespace"
            ),
        ),
        None => partition_list(&spec.individual_hash_partitions, "individual_hash_partition"),
    }
}

fn subpartition(def: &PartitioningDef, parent_active: bool) -> String {
    match def.spec.subpartition_type.as_deref() {
        Some(kind) => format!(
            " SUBPARTITION BY {}{}",
            kind.trim().to_ascii_uppercase(),
            key_list(&def.subpartition_keys, parent_active)
        ),
        None => String::new(),
    }
}

fn partition_clause(by: PartitionBy, def: &PartitioningDef, parent_active: bool) -> String {
    let spec = &def.spec;
    let store_in = || tablespace_list(&spec.store_in_tablespaces, None, "store_in_tablespace");
    match by {
        PartitionBy::Range => format!(
            "{}{}{}",
            interval(def),
            store_in(),
            partition_list(&spec.range_partitions, "range_partition_clause")
        ),
        PartitionBy::List => format!(
            "{}{}{}",
            if spec.automatic { " AUTOMATIC" } else { "" },
            store_in(),
            partition_list(&spec.list_partitions, "list_partition_clause")
        ),
        PartitionBy::Hash => hash_partitions(def),
        PartitionBy::Reference => format!(
            "{}{}",
            spec.constraint
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default(),
            partition_list(&spec.reference_partition_descs, "reference_partition_desc")
        ),
        PartitionBy::System => match spec.system_partitioning_quantity {
            Some(quantity) => format!(" PARTITIONS {quantity}"),
            None => partition_list(&spec.system_partition_descs, "system_partition_desc"),
        },
        PartitionBy::CompositeRange => format!(
            "{}{}{}{}",
            interval(def),
            store_in(),
            subpartition(def, parent_active),
            partition_list(&spec.range_subpartition_descs, "range_subpartition_desc")
        ),
        PartitionBy::CompositeList => format!(
            "{}{}{}",
            tablespace_list(&spec.store_in_tablespaces, Some("AUTOMATIC"), "store_in_tablespace"),
            subpartition(def, parent_active),
            partition_list(&spec.list_subpartition_descs, "list_subpartition_description")
        ),
        PartitionBy::CompositeHash => format!("{}{}", subpartition(def, parent_active), hash_partitions(def)),
    }
}

/// Full `PARTITION BY ...` clause, or `None` without a known partition kind.
pub fn partitioning_clause(def: &PartitioningDef, parent_active: bool) -> Option<String> {
    let raw = def.spec.partition_by.as_deref()?;
    let Some(by) = PartitionBy::from_str(raw) else {
        tracing::warn!(target: "oraddl::hydrate", partition_by = raw, "unknown partitioning kind");
        return None;
    };
    Some(format!(
        "PARTITION BY {}{}{}",
        by.keyword(),
        key_list(&def.keys, parent_active),
        partition_clause(by, def, parent_active)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Partitioning;
    use serde_json::json;

    fn def(spec: serde_json::Value, keys: Vec<KeyColumn>) -> PartitioningDef {
        let spec: Partitioning = serde_json::from_value(spec).unwrap();
        PartitioningDef {
            spec,
            subpartition_keys: keys.clone(),
            keys,
        }
    }

    #[test]
    fn test_range_partitioning() {
        let d = def(
            json!({
                "partitionBy": "range",
                "interval": "NUMTOYMINTERVAL(1, 'MONTH')",
                "range_partitions": [
                    { "range_partition_clause": "PARTITION p0 VALUES LESS THAN (DATE '2020-01-01')" },
                    { "range_partition_clause": "PARTITION p1 VALUES LESS THAN (MAXVALUE)" }
                ]
            }),
            vec![KeyColumn::new("created", true)],
        );
        assert_eq!(
            partitioning_clause(&d, true).unwrap(),
            "PARTITION BY RANGE (\"created\") INTERVAL (NUMTOYMINTERVAL(1, 'MONTH'))\n(\n\tPARTITION p0 VALUES LESS THAN (DATE '2020-01-01'),\n\tPARTITION p1 VALUES LESS THAN (MAXVALUE)\n)"
        );
    }

    #[test]
    fn test_hash_partitioning_by_quantity() {
        let d = def(
            json!({
                "partitionBy": "hash",
                "hash_partition_quantity": 4,
                "store_in_tablespaces": [{ "store_in_tablespace": "ts1" }, { "store_in_tablespace": "ts2" }],
                "overflow_store_in_tablespaces": [{ "overflow_store_in_tablespace": "ts3" }]
            }),
            vec![KeyColumn::new("id", true)],
        );
        assert_eq!(
            partitioning_clause(&d, true).unwrap(),
            "PARTITION BY HASH (\"id\") PARTITIONS 4 STORE IN (ts1, ts2) OVERFLOW STORE IN (ts3)"
        );
    }

    #[test]
    fn test_composite_list_with_subpartition() {
        let d = def(
            json!({
                "partitionBy": "composite list",
                "subpartitionType": "hash",
                "store_in_tablespaces": [{ "store_in_tablespace": "ts1" }]
            }),
            vec![KeyColumn::new("region", true)],
        );
        assert_eq!(
            partitioning_clause(&d, true).unwrap(),
            "PARTITION BY LIST (\"region\") AUTOMATIC STORE IN (ts1) SUBPARTITION BY HASH (\"region\")"
        );
    }

    #[test]
    fn test_system_and_reference() {
        let system = def(json!({ "partitionBy": "system", "system_partitioning_quantity": 3 }), vec![]);
        assert_eq!(partitioning_clause(&system, true).unwrap(), "PARTITION BY SYSTEM PARTITIONS 3");

        let reference = def(json!({ "partitionBy": "reference", "constraint": "fk_order" }), vec![]);
        assert_eq!(partitioning_clause(&reference, true).unwrap(), "PARTITION BY REFERENCE (fk_order)");
    }

    #[test]
    fn test_deactivated_partition_key() {
        let d = def(
            json!({ "partitionBy": "list", "automatic": true }),
            vec![KeyColumn::new("a", true), KeyColumn::new("b", false)],
        );
        assert_eq!(
            partitioning_clause(&d, true).unwrap(),
            "PARTITION BY LIST (\"a\" /* \"b\" */) AUTOMATIC"
        );
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let d = def(json!({ "partitionBy": "sideways" }), vec![]);
        assert!(partitioning_clause(&d, true).is_none());
    }
}
