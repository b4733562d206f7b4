use tracing::warn;

use super::field_type;
use crate::activation::Renderable;
use crate::ddl::DdlProvider;
use crate::delta::{Change, Delta, Item, Section};
use crate::naming::{qualified, quote};
use crate::schema::TableNode;
use crate::template::Values;
use crate::templates;

fn tables<'a>(items: &'a [Item], change: Change) -> impl Iterator<Item = Delta<TableNode>> + 'a {
    items
        .iter()
        .filter_map(Item::project::<TableNode>)
        .filter(move |delta| delta.change == change)
}

/// Schema-qualified table name, or `None` (logged) when the node has none.
fn full_name(delta: &Delta<TableNode>) -> Option<String> {
    match delta.node.entity_name() {
        Some(name) => Some(qualified(name, delta.schema_name.as_deref())),
        None => {
            warn!(target: "oraddl::hydrate", item = %delta.key, "table without a name");
            None
        }
    }
}

fn create_table(provider: &DdlProvider, delta: &Delta<TableNode>) -> Option<String> {
    let schema = delta.schema_name.as_deref();
    let Some(table) = provider.hydrate_table(&delta.node, schema) else {
        warn!(target: "oraddl::hydrate", item = %delta.key, "table without a name");
        return None;
    };
    let mut statements = vec![provider.create_table(&table)];
    statements.extend(
        table
            .indexes
            .iter()
            .map(|index| provider.create_index(&table.name, schema, index, table.active)),
    );
    Some(statements.join("\n\n"))
}

fn add_columns(provider: &DdlProvider, delta: &Delta<TableNode>) -> Vec<String> {
    let Some(name) = full_name(delta) else {
        return Vec::new();
    };
    delta
        .node
        .properties
        .iter()
        .filter(|(_, property)| property.comp_mod.is_none())
        .map(|(column, property)| {
            let column =
                provider.hydrate_column(column, property, &delta.node.required, delta.schema_name.as_deref());
            let statement = templates::ADD_COLUMN.assemble(
                &Values::new()
                    .set("name", name.clone())
                    .set("column", provider.column_renderable(&column).text),
            );
            Renderable::new(statement, column.active && delta.node.is_activated).render()
        })
        .collect()
}

fn drop_columns(delta: &Delta<TableNode>) -> Vec<String> {
    let Some(name) = full_name(delta) else {
        return Vec::new();
    };
    delta
        .node
        .properties
        .iter()
        .filter(|(_, property)| property.comp_mod.is_none())
        .map(|(column, _)| {
            templates::DROP_COLUMN.assemble(&Values::new().set("name", name.clone()).set("column", quote(column)))
        })
        .collect()
}

/// Renames first, then type changes, each in column order.
fn modify_columns(delta: &Delta<TableNode>) -> Vec<String> {
    let Some(name) = full_name(delta) else {
        return Vec::new();
    };
    let changes: Vec<_> = delta
        .node
        .properties
        .iter()
        .filter_map(|(column, property)| property.comp_mod.as_ref().map(|change| (column, change)))
        .collect();

    let renames = changes.iter().filter(|(_, change)| change.renamed()).filter_map(|(_, change)| {
        let old = change.old_field.name.as_deref()?;
        let new = change.new_field.name.as_deref()?;
        Some(templates::RENAME_COLUMN.assemble(
            &Values::new()
                .set("name", name.clone())
                .set("oldName", quote(old))
                .set("newName", quote(new)),
        ))
    });
    let retypes = changes.iter().filter(|(_, change)| change.retyped()).filter_map(|(column, change)| {
        let Some(type_name) = field_type(&change.new_field) else {
            warn!(target: "oraddl::hydrate", column = %column, "type change without a new type");
            return None;
        };
        Some(templates::MODIFY_COLUMN.assemble(
            &Values::new()
                .set("name", name.clone())
                .set("column", quote(column))
                .set("type", type_name),
        ))
    });
    renames.chain(retypes).collect()
}

pub(super) fn scripts(section: &Section, provider: &DdlProvider) -> Vec<String> {
    let created: Vec<String> = tables(&section.added, Change::Created)
        .filter_map(|delta| create_table(provider, &delta))
        .collect();
    let deleted: Vec<String> = tables(&section.deleted, Change::Deleted)
        .filter_map(|delta| full_name(&delta))
        .map(|name| templates::DROP_TABLE.assemble(&Values::new().set("name", name)))
        .collect();
    let added_columns: Vec<String> = tables(&section.added, Change::Fields)
        .flat_map(|delta| add_columns(provider, &delta))
        .collect();
    let dropped_columns: Vec<String> = tables(&section.deleted, Change::Fields)
        .flat_map(|delta| drop_columns(&delta))
        .collect();
    let modified_columns: Vec<String> = tables(&section.modified, Change::Fields)
        .flat_map(|delta| modify_columns(&delta))
        .collect();

    [created, deleted, added_columns, dropped_columns, modified_columns]
        .into_iter()
        .flatten()
        .collect()
}
