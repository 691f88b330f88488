use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Sentinel application name used when no `apps/<name>/` segment can be
/// inferred from an item's path.
pub const UNKNOWN_APP: &str = "Unknown";

/// Entity kinds tracked by the feature map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Screen,
    Component,
    Action,
    Module,
    Table,
}

/// Flat intermediate record for one discovered entity.
///
/// Relationship fields are semantically sets with insertion order preserved;
/// the merger guarantees they never contain duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMapItem {
    /// Discriminator for all downstream processing.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Entity identifier, unique per kind.
    pub name: String,
    /// Source file path relative to the project root. Stable identity key.
    pub path: String,
    /// Optional grouping tag from `@feature`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Owning application/package name.
    pub app: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_components: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_actions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_in_screens: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_in_components: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_in_actions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_in_middleware: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_in_layouts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_modules: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub used_in_modules: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub db_tables: Vec<String>,
}

impl FeatureMapItem {
    /// Creates an item with empty relationships and an unknown app.
    pub fn new(kind: EntityKind, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            path: path.into(),
            feature: None,
            app: UNKNOWN_APP.to_string(),
            used_components: Vec::new(),
            used_actions: Vec::new(),
            used_in_screens: Vec::new(),
            used_in_components: Vec::new(),
            used_in_actions: Vec::new(),
            used_in_middleware: Vec::new(),
            used_in_layouts: Vec::new(),
            used_modules: Vec::new(),
            used_in_modules: Vec::new(),
            db_tables: Vec::new(),
        }
    }
}

/// Per-file usage record produced by the reference analyzer.
///
/// Files with no detected usage in any category are omitted from the result
/// map entirely, so an existing record always has at least one non-empty list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUsage {
    /// Relative path of the analyzed file.
    pub file_path: String,
    /// Imported component names verified as JSX tags.
    pub used_components: Vec<String>,
    /// Imported action names verified as call targets.
    pub used_actions: Vec<String>,
    /// Imported module symbol names (no call-site verification).
    pub used_modules: Vec<String>,
    /// Resolved file paths for module-category imports.
    pub used_module_paths: Vec<String>,
}

impl FileUsage {
    /// Creates an empty usage record for a file.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Returns `true` when no usage was detected in any category.
    pub fn is_empty(&self) -> bool {
        self.used_components.is_empty()
            && self.used_actions.is_empty()
            && self.used_modules.is_empty()
            && self.used_module_paths.is_empty()
    }
}

/// Inverted index from entity names and module paths to referencing files.
///
/// Built once per analysis run and immutable afterwards. Insertion order of
/// the file lists equals analysis order; deduplication happens later in the
/// merger.
#[derive(Debug, Clone, Default)]
pub struct ReverseReferenceMap {
    pub component_to_files: FxHashMap<String, Vec<String>>,
    pub action_to_files: FxHashMap<String, Vec<String>>,
    pub module_to_files: FxHashMap<String, Vec<String>>,
    pub module_path_to_files: FxHashMap<String, Vec<String>>,
}

impl ReverseReferenceMap {
    /// Records every usage entry of `usage` under the referencing file path.
    pub fn record(&mut self, usage: &FileUsage) {
        for name in &usage.used_components {
            self.component_to_files
                .entry(name.clone())
                .or_default()
                .push(usage.file_path.clone());
        }
        for name in &usage.used_actions {
            self.action_to_files
                .entry(name.clone())
                .or_default()
                .push(usage.file_path.clone());
        }
        for name in &usage.used_modules {
            self.module_to_files
                .entry(name.clone())
                .or_default()
                .push(usage.file_path.clone());
        }
        for path in &usage.used_module_paths {
            self.module_path_to_files
                .entry(path.clone())
                .or_default()
                .push(usage.file_path.clone());
        }
    }
}

/// Output of one reference-analysis run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceAnalysisResult {
    /// Sparse map from file path to its usage record.
    pub file_usages: FxHashMap<String, FileUsage>,
    /// Inverted reference index over all file usages.
    pub references: ReverseReferenceMap,
}

/// Auxiliary per-module metadata collected by the annotation extractor,
/// independent of the relationship graph.
#[derive(Debug, Clone, Default)]
pub struct ModuleMetadata {
    /// Module name to free-form description.
    pub descriptions: BTreeMap<String, String>,
    /// Module name to declared type-definition names.
    pub types: BTreeMap<String, Vec<String>>,
    /// Module name to declared utility-export names.
    pub utilities: BTreeMap<String, Vec<String>>,
}

impl ModuleMetadata {
    /// Folds another metadata set into this one. First description wins;
    /// list entries are appended without duplicates.
    pub fn extend(&mut self, other: ModuleMetadata) {
        for (name, description) in other.descriptions {
            self.descriptions.entry(name).or_insert(description);
        }
        for (name, types) in other.types {
            let entry = self.types.entry(name).or_default();
            for value in types {
                push_unique(entry, &value);
            }
        }
        for (name, utilities) in other.utilities {
            let entry = self.utilities.entry(name).or_default();
            for value in utilities {
                push_unique(entry, &value);
            }
        }
    }
}

/// Typed entry for a routed screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenEntry {
    pub name: String,
    pub path: String,
    pub app: String,
    pub used_components: Vec<String>,
    pub used_actions: Vec<String>,
}

/// Typed entry for a reusable component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEntry {
    pub name: String,
    pub path: String,
    pub app: String,
    pub used_components: Vec<String>,
    pub used_actions: Vec<String>,
    pub used_in_screens: Vec<String>,
    pub used_in_components: Vec<String>,
    pub used_in_layouts: Vec<String>,
}

/// Typed entry for a callable business-logic action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub name: String,
    pub path: String,
    pub app: String,
    pub used_in_screens: Vec<String>,
    pub used_in_components: Vec<String>,
    pub used_in_actions: Vec<String>,
    pub used_in_middleware: Vec<String>,
    pub used_in_layouts: Vec<String>,
    pub db_tables: Vec<String>,
}

/// Typed entry for a shared library module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEntry {
    pub name: String,
    pub path: String,
    pub app: String,
    pub used_modules: Vec<String>,
    pub used_in_modules: Vec<String>,
}

/// Typed entry for a database table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    pub name: String,
    pub path: String,
    pub app: String,
    pub used_in_actions: Vec<String>,
}

/// One business feature's worth of entities, split per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGroup {
    pub screens: Vec<ScreenEntry>,
    pub components: Vec<ComponentEntry>,
    pub actions: Vec<ActionEntry>,
    pub modules: Vec<ModuleEntry>,
    pub tables: Vec<TableEntry>,
}

impl FeatureGroup {
    /// Returns `true` when the group holds no entity of any kind.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
            && self.components.is_empty()
            && self.actions.is_empty()
            && self.modules.is_empty()
            && self.tables.is_empty()
    }
}

/// Final browsable artifact. Every field except `generated_at` is fully
/// deterministic given identical source input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMap {
    /// Feature name to its entity group, key-ordered for diffability.
    pub features: BTreeMap<String, FeatureGroup>,
    /// Items without a `@feature` tag.
    pub uncategorized: FeatureGroup,
    /// Module name to description.
    pub module_descriptions: BTreeMap<String, String>,
    /// Module name to declared type-definition names.
    pub module_types: BTreeMap<String, Vec<String>>,
    /// Module name to declared utility exports.
    pub module_utilities: BTreeMap<String, Vec<String>>,
    /// Sorted distinct app names, excluding the unknown sentinel.
    pub apps: Vec<String>,
    /// ISO-8601 build timestamp.
    pub generated_at: String,
}

/// Appends `value` to `list` unless an equal entry is already present.
/// Existing entries keep their position; repeated calls never re-append.
pub fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_unique_preserves_order_and_skips_duplicates() {
        let mut list = vec!["a".to_string(), "b".to_string()];
        push_unique(&mut list, "c");
        push_unique(&mut list, "a");
        push_unique(&mut list, "c");
        assert_eq!(list, vec!["a", "b", "c"]);
    }

    #[test]
    fn reverse_map_records_in_insertion_order() {
        let mut usage = FileUsage::new("apps/web/screens/Home.tsx");
        usage.used_components.push("Button".to_string());
        usage.used_actions.push("getUser".to_string());

        let mut map = ReverseReferenceMap::default();
        map.record(&usage);
        let mut second = FileUsage::new("apps/web/screens/About.tsx");
        second.used_components.push("Button".to_string());
        map.record(&second);

        assert_eq!(
            map.component_to_files["Button"],
            vec!["apps/web/screens/Home.tsx", "apps/web/screens/About.tsx"]
        );
        assert_eq!(map.action_to_files["getUser"], vec!["apps/web/screens/Home.tsx"]);
    }

    #[test]
    fn item_serializes_with_camel_case_contract() {
        let mut item = FeatureMapItem::new(EntityKind::Screen, "Dashboard", "apps/web/app/dashboard/page.tsx");
        item.used_components.push("UserCard".to_string());
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["type"], "screen");
        assert_eq!(json["usedComponents"][0], "UserCard");
        assert!(json.get("usedActions").is_none(), "empty lists are omitted");
    }
}
