//! Logical and foreign type tables.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Oracle equivalent of a foreign SQL type name, with the qualifiers the
/// foreign type implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignType {
    pub type_name: &'static str,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl ForeignType {
    const fn plain(type_name: &'static str) -> Self {
        Self {
            type_name,
            length: None,
            precision: None,
            scale: None,
        }
    }

    const fn length(type_name: &'static str, length: u32) -> Self {
        Self {
            type_name,
            length: Some(length),
            precision: None,
            scale: None,
        }
    }

    const fn precision(type_name: &'static str, precision: u32) -> Self {
        Self {
            type_name,
            length: None,
            precision: Some(precision),
            scale: None,
        }
    }

    const fn scaled(type_name: &'static str, precision: u32, scale: u32) -> Self {
        Self {
            type_name,
            length: None,
            precision: Some(precision),
            scale: Some(scale),
        }
    }
}

/// Result of a catalog lookup. Unknown names pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub type_name: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl ResolvedType {
    fn passthrough(name: &str) -> Self {
        Self {
            type_name: name.to_string(),
            length: None,
            precision: None,
            scale: None,
        }
    }
}

impl From<&ForeignType> for ResolvedType {
    fn from(t: &ForeignType) -> Self {
        Self {
            type_name: t.type_name.to_string(),
            length: t.length,
            precision: t.precision,
            scale: t.scale,
        }
    }
}

static DEFAULT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("number", "numeric"),
        ("string", "nvarchar2"),
        ("date", "date"),
        ("timestamp", "timestamp"),
        ("binary", "raw"),
        ("boolean", "numeric"),
        ("document", "bfile"),
        ("array", "json"),
        ("objectId", "char"),
        ("default", "nvarchar2"),
    ])
});

static FOREIGN_TYPES: Lazy<HashMap<&'static str, ForeignType>> = Lazy::new(|| {
    HashMap::from([
        // Character types
        ("character", ForeignType::plain("char")),
        ("character varying", ForeignType::plain("varchar")),
        ("char varying", ForeignType::plain("varchar")),
        ("national char", ForeignType::plain("nchar")),
        ("national character", ForeignType::plain("nchar")),
        ("national char varying", ForeignType::plain("nvarchar2")),
        ("national character varying", ForeignType::plain("nvarchar2")),
        ("nchar varying", ForeignType::plain("nvarchar2")),
        ("long varchar", ForeignType::plain("long")),
        ("text", ForeignType::plain("long")),
        ("ntext", ForeignType::plain("long")),
        ("string", ForeignType::plain("nvarchar2")),
        ("uniqueidentifier", ForeignType::length("char", 36)),
        ("uuid", ForeignType::length("char", 36)),
        // Integers
        ("tinyint", ForeignType::precision("number", 5)),
        ("small int", ForeignType::precision("number", 5)),
        ("shortinteger", ForeignType::precision("number", 5)),
        ("shortint", ForeignType::precision("number", 5)),
        ("smallint", ForeignType::precision("number", 5)),
        ("int", ForeignType::precision("number", 10)),
        ("integer", ForeignType::precision("number", 10)),
        ("longinteger", ForeignType::precision("number", 20)),
        ("bigint", ForeignType::precision("number", 20)),
        ("int8", ForeignType::precision("number", 20)),
        ("bit", ForeignType::precision("number", 1)),
        // Decimals and floating point
        ("shortdecimal", ForeignType::scaled("number", 5, 0)),
        ("decimal", ForeignType::scaled("number", 5, 0)),
        ("real", ForeignType::length("float", 23)),
        ("double precision", ForeignType::plain("number")),
        ("small money", ForeignType::scaled("float", 16, 2)),
        ("money", ForeignType::scaled("float", 16, 2)),
        // Date/time
        ("datetime", ForeignType::plain("date")),
        ("small datetime", ForeignType::plain("date")),
        // Binary
        ("image", ForeignType::plain("long raw")),
        ("binary", ForeignType::plain("raw")),
        ("varbinary", ForeignType::plain("raw")),
    ])
});

/// Native type for a logical kind (`number`, `string`, `objectId`, ...).
pub fn resolve_default_type(kind: &str) -> Option<&'static str> {
    DEFAULT_TYPES.get(kind).copied()
}

/// Catalog entry for a foreign type name, matched case-insensitively.
pub fn lookup_foreign_type(name: &str) -> Option<&'static ForeignType> {
    FOREIGN_TYPES.get(name.trim().to_ascii_lowercase().as_str())
}

/// Oracle equivalent of `name`; unknown names come back unchanged.
pub fn resolve_foreign_type(name: &str) -> ResolvedType {
    lookup_foreign_type(name)
        .map(ResolvedType::from)
        .unwrap_or_else(|| ResolvedType::passthrough(name))
}

/// Whether `name` is one of the known foreign type names.
pub fn has_type(name: &str) -> bool {
    lookup_foreign_type(name).is_some()
}

/// Full resolution of a column's declared type into an upper-cased native
/// name. An explicit `mode` is taken as already native; a bare logical kind
/// goes through the default table; either result is then checked against
/// the foreign table.
pub fn resolve_column_type(mode: Option<&str>, kind: Option<&str>) -> ResolvedType {
    let candidate = match (mode, kind) {
        (Some(mode), _) => mode.to_string(),
        (None, Some(kind)) => resolve_default_type(kind).unwrap_or(kind).to_string(),
        (None, None) => return ResolvedType::passthrough(""),
    };
    let mut resolved = resolve_foreign_type(&candidate);
    resolved.type_name = resolved.type_name.trim().to_ascii_uppercase();
    resolved
}
