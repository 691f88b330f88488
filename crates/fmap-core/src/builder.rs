//! Final assembly of the feature map from the merged flat item list.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::model::{
    ActionEntry, ComponentEntry, EntityKind, FeatureGroup, FeatureMap, FeatureMapItem,
    ModuleEntry, ModuleMetadata, ScreenEntry, TableEntry, UNKNOWN_APP,
};

/// Build the final feature map from fully-merged items and module metadata.
///
/// Pure projection apart from the `generatedAt` timestamp: every item lands
/// in exactly one group (its declared feature, or the uncategorized bucket),
/// relationship lists default to empty rather than being omitted, and `apps`
/// is the sorted distinct set of observed app names minus the unknown
/// sentinel.
pub fn build_feature_map(items: Vec<FeatureMapItem>, metadata: ModuleMetadata) -> FeatureMap {
    let mut features: BTreeMap<String, FeatureGroup> = BTreeMap::new();
    let mut uncategorized = FeatureGroup::default();
    let mut apps: Vec<String> = Vec::new();

    for item in items {
        if item.app != UNKNOWN_APP && !apps.contains(&item.app) {
            apps.push(item.app.clone());
        }
        let group = match item.feature.as_deref() {
            Some(feature) if !feature.is_empty() => {
                features.entry(feature.to_string()).or_default()
            }
            _ => &mut uncategorized,
        };
        match item.kind {
            EntityKind::Screen => group.screens.push(screen_entry(item)),
            EntityKind::Component => group.components.push(component_entry(item)),
            EntityKind::Action => group.actions.push(action_entry(item)),
            EntityKind::Module => group.modules.push(module_entry(item)),
            EntityKind::Table => group.tables.push(table_entry(item)),
        }
    }

    apps.sort();

    FeatureMap {
        features,
        uncategorized,
        module_descriptions: metadata.descriptions,
        module_types: metadata.types,
        module_utilities: metadata.utilities,
        apps,
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn screen_entry(item: FeatureMapItem) -> ScreenEntry {
    ScreenEntry {
        name: item.name,
        path: item.path,
        app: item.app,
        used_components: item.used_components,
        used_actions: item.used_actions,
    }
}

fn component_entry(item: FeatureMapItem) -> ComponentEntry {
    ComponentEntry {
        name: item.name,
        path: item.path,
        app: item.app,
        used_components: item.used_components,
        used_actions: item.used_actions,
        used_in_screens: item.used_in_screens,
        used_in_components: item.used_in_components,
        used_in_layouts: item.used_in_layouts,
    }
}

fn action_entry(item: FeatureMapItem) -> ActionEntry {
    ActionEntry {
        name: item.name,
        path: item.path,
        app: item.app,
        used_in_screens: item.used_in_screens,
        used_in_components: item.used_in_components,
        used_in_actions: item.used_in_actions,
        used_in_middleware: item.used_in_middleware,
        used_in_layouts: item.used_in_layouts,
        db_tables: item.db_tables,
    }
}

fn module_entry(item: FeatureMapItem) -> ModuleEntry {
    ModuleEntry {
        name: item.name,
        path: item.path,
        app: item.app,
        used_modules: item.used_modules,
        used_in_modules: item.used_in_modules,
    }
}

fn table_entry(item: FeatureMapItem) -> TableEntry {
    TableEntry {
        name: item.name,
        path: item.path,
        app: item.app,
        used_in_actions: item.used_in_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: EntityKind, name: &str, feature: Option<&str>, app: &str) -> FeatureMapItem {
        let mut item = FeatureMapItem::new(kind, name, format!("apps/{app}/src/{name}.tsx"));
        item.feature = feature.map(str::to_string);
        item.app = app.to_string();
        item
    }

    #[test]
    fn every_item_lands_in_exactly_one_group() {
        let items = vec![
            item(EntityKind::Screen, "Dashboard", Some("Projects"), "web"),
            item(EntityKind::Component, "UserCard", Some("Projects"), "web"),
            item(EntityKind::Action, "getProjects", None, "web"),
            item(EntityKind::Table, "users", Some("Auth"), "web"),
        ];
        let map = build_feature_map(items, ModuleMetadata::default());

        let grouped = map.features["Projects"].screens.len()
            + map.features["Projects"].components.len()
            + map.features["Auth"].tables.len()
            + map.uncategorized.actions.len();
        assert_eq!(grouped, 4);
        assert!(map.features["Projects"].actions.is_empty());
        assert!(map.uncategorized.screens.is_empty());
    }

    #[test]
    fn empty_feature_tag_routes_to_uncategorized() {
        let mut screen = item(EntityKind::Screen, "Login", None, "web");
        screen.feature = Some(String::new());
        let map = build_feature_map(vec![screen], ModuleMetadata::default());
        assert_eq!(map.uncategorized.screens.len(), 1);
        assert!(map.features.is_empty());
    }

    #[test]
    fn apps_are_sorted_and_exclude_unknown() {
        let items = vec![
            item(EntityKind::Screen, "A", None, "web"),
            item(EntityKind::Screen, "B", None, "admin"),
            item(EntityKind::Screen, "C", None, UNKNOWN_APP),
            item(EntityKind::Screen, "D", None, "web"),
        ];
        let map = build_feature_map(items, ModuleMetadata::default());
        assert_eq!(map.apps, vec!["admin", "web"]);
    }

    #[test]
    fn relationship_lists_serialize_as_empty_arrays() {
        let map = build_feature_map(
            vec![item(EntityKind::Screen, "Home", None, "web")],
            ModuleMetadata::default(),
        );
        let json = serde_json::to_value(&map).expect("serialize");
        assert_eq!(json["uncategorized"]["screens"][0]["usedComponents"], serde_json::json!([]));
    }
}
