use super::DdlProvider;
use crate::activation::{Renderable, join_members};
use crate::ir::{IndexDef, IndexKeyDef};
use crate::naming::{qualified, quote};
use crate::template::Values;
use crate::templates;

fn index_key(key: &IndexKeyDef) -> Renderable {
    let order = key
        .order
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| format!(" {}", o.to_ascii_uppercase()))
        .unwrap_or_default();
    Renderable::new(format!("{}{order}", quote(&key.column.name)), key.column.active)
}

/// Key block including its leading layout; expressions stand in when no
/// column keys are declared.
fn index_keys(index: &IndexDef, active: bool) -> String {
    if !index.keys.is_empty() {
        let keys: Vec<Renderable> = index.keys.iter().map(index_key).collect();
        return format!("\n(\n\t{}\n)", join_members(&keys, ",\n\t", active));
    }
    if index.expressions.is_empty() {
        String::new()
    } else {
        format!(" ({})", index.expressions.join(", "))
    }
}

/// Explicit index properties replace the individual clauses.
fn index_options(index: &IndexDef) -> Option<String> {
    if let Some(properties) = index.properties.as_deref().filter(|p| !p.trim().is_empty()) {
        return Some(properties.trim().to_string());
    }
    let parts: Vec<String> = [
        index.logging.as_deref().map(str::to_ascii_uppercase),
        index.tablespace.as_deref().map(|t| format!("TABLESPACE {t}")),
        index.compression.clone(),
        index.attributes.clone(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.trim().is_empty())
    .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

impl DdlProvider {
    pub fn create_index(
        &self,
        table_name: &str,
        schema_name: Option<&str>,
        index: &IndexDef,
        parent_active: bool,
    ) -> String {
        let active = index.active && parent_active;
        let text = templates::CREATE_INDEX.assemble(
            &Values::new()
                .opt(
                    "indexType",
                    index
                        .index_type
                        .as_deref()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_ascii_uppercase),
                )
                .set("name", quote(&index.name))
                .set("tableName", qualified(table_name, schema_name))
                .set("keys", index_keys(index, active))
                .opt("options", index_options(index)),
        );
        Renderable::new(text, active).render()
    }
}
