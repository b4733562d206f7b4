use tracing::warn;

use crate::ddl::DdlProvider;
use crate::delta::{Change, Delta, Item, Section};
use crate::ir::ViewDef;
use crate::naming::qualified;
use crate::schema::ViewNode;
use crate::template::Values;
use crate::templates;

fn hydrate(provider: &DdlProvider, item: &Item, change: Change) -> Option<ViewDef> {
    let delta: Delta<ViewNode> = item.project()?;
    if delta.change != change {
        return None;
    }
    let view = provider.hydrate_view(&delta.node, delta.schema_name.as_deref());
    if view.is_none() {
        warn!(target: "oraddl::hydrate", item = %delta.key, "view without a name");
    }
    view
}

/// Views are dropped before any are created, so a replaced view frees its
/// name first. Created views need a body to be emitted.
pub(super) fn scripts(section: &Section, provider: &DdlProvider) -> Vec<String> {
    let dropped = section
        .deleted
        .iter()
        .filter_map(|item| hydrate(provider, item, Change::Deleted))
        .map(|view| {
            templates::DROP_VIEW.assemble(
                &Values::new().set("name", qualified(&view.name, view.schema_name.as_deref())),
            )
        });
    let created = section
        .added
        .iter()
        .filter_map(|item| hydrate(provider, item, Change::Created))
        .filter(ViewDef::has_body)
        .map(|view| provider.create_view(&view));
    dropped.chain(created).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaDocument;
    use serde_json::json;

    #[test]
    fn test_drop_before_create() {
        let doc = DeltaDocument::from_value(&json!({
            "views": {
                "added": { "items": [
                    { "v1": {
                        "name": "v_orders",
                        "compMod": { "created": true, "keyspaceName": "SALES" },
                        "role": { "selectStatement": "SELECT * FROM orders" }
                    } },
                    { "v2": { "name": "v_empty", "compMod": { "created": true } } }
                ] },
                "deleted": { "items": [{ "v1": {
                    "name": "v_orders",
                    "compMod": { "deleted": true, "keyspaceName": "SALES" }
                } }] }
            }
        }))
        .unwrap();
        assert_eq!(
            scripts(&doc.views, &DdlProvider::default()),
            vec![
                "DROP VIEW \"SALES\".\"v_orders\";".to_string(),
                "CREATE VIEW \"SALES\".\"v_orders\"\n\tAS SELECT * FROM orders;".to_string(),
            ]
        );
    }
}
