//! Type catalog and type clause decoration.

pub mod catalog;
pub mod decorate;

pub use catalog::{ForeignType, ResolvedType, resolve_column_type, resolve_default_type, resolve_foreign_type};
pub use decorate::{LengthSemantics, TypeQualifiers, decorate, replace_type_by_version};
