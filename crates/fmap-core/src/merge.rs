//! Merging of inferred references into declared relationship lists.
//!
//! Each pass is idempotent and never discards declared data: inferred entries
//! are appended to whatever the annotations already stated, with an
//! order-preserving union. The passes must run in the documented order, since
//! the table and module passes depend on fully-populated `dbTables` and
//! `usedModulePaths` state.

use rustc_hash::FxHashMap;

use crate::model::{push_unique, EntityKind, FeatureMapItem, ReferenceAnalysisResult};

/// Run all merge passes over the flat item list.
pub fn merge_references(items: &mut [FeatureMapItem], analysis: &ReferenceAnalysisResult) {
    merge_forward_usage(items, analysis);
    merge_reverse_usage(items, analysis);
    link_table_actions(items);
    link_module_references(items, analysis);
}

/// Pass 1: append each screen/component's own file usage into its
/// `usedComponents` / `usedActions` lists.
pub fn merge_forward_usage(items: &mut [FeatureMapItem], analysis: &ReferenceAnalysisResult) {
    for item in items.iter_mut() {
        if !matches!(item.kind, EntityKind::Screen | EntityKind::Component) {
            continue;
        }
        let Some(usage) = analysis.file_usages.get(&item.path) else {
            continue;
        };
        for name in &usage.used_components {
            push_unique(&mut item.used_components, name);
        }
        for name in &usage.used_actions {
            push_unique(&mut item.used_actions, name);
        }
    }
}

/// Pass 2: for each component/action, translate the files referencing it
/// into the owning screen/component display names and append them to
/// `usedInScreens` / `usedInComponents`.
///
/// The reverse map stores file paths; the relationship fields store entity
/// names, so the path-to-name translation happens here rather than in the
/// analyzer.
pub fn merge_reverse_usage(items: &mut [FeatureMapItem], analysis: &ReferenceAnalysisResult) {
    let owners = owners_by_path(items);
    for item in items.iter_mut() {
        let referencing_files = match item.kind {
            EntityKind::Component => analysis.references.component_to_files.get(&item.name),
            EntityKind::Action => analysis.references.action_to_files.get(&item.name),
            _ => None,
        };
        let Some(referencing_files) = referencing_files else {
            continue;
        };
        for file in referencing_files {
            let Some(file_owners) = owners.get(file) else {
                continue;
            };
            for (kind, name) in file_owners {
                match kind {
                    EntityKind::Screen => push_unique(&mut item.used_in_screens, name),
                    EntityKind::Component => push_unique(&mut item.used_in_components, name),
                    _ => {}
                }
            }
        }
    }
}

/// Pass 3: record which actions touch which tables on the table side.
///
/// Table names are compared case-insensitively because SQL identifiers are
/// frequently cased inconsistently between action annotations and schema
/// definitions.
pub fn link_table_actions(items: &mut [FeatureMapItem]) {
    let actions: Vec<(String, Vec<String>)> = items
        .iter()
        .filter(|item| item.kind == EntityKind::Action && !item.db_tables.is_empty())
        .map(|item| {
            let tables = item.db_tables.iter().map(|t| t.to_lowercase()).collect();
            (item.name.clone(), tables)
        })
        .collect();

    for item in items.iter_mut() {
        if item.kind != EntityKind::Table {
            continue;
        }
        let table_name = item.name.to_lowercase();
        for (action_name, tables) in &actions {
            if tables.iter().any(|t| *t == table_name) {
                push_unique(&mut item.used_in_actions, action_name);
            }
        }
    }
}

/// Pass 4: bidirectional module-to-module linking via resolved import paths.
///
/// For every module whose file imports another module's file path, the
/// source gains the target in `usedModules` and the target gains the source
/// in `usedInModules`, both written in the same pass.
pub fn link_module_references(items: &mut [FeatureMapItem], analysis: &ReferenceAnalysisResult) {
    let module_index: FxHashMap<String, usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.kind == EntityKind::Module)
        .map(|(idx, item)| (item.path.clone(), idx))
        .collect();

    let mut links: Vec<(usize, usize)> = Vec::new();
    for (source_idx, item) in items.iter().enumerate() {
        if item.kind != EntityKind::Module {
            continue;
        }
        let Some(usage) = analysis.file_usages.get(&item.path) else {
            continue;
        };
        for path in &usage.used_module_paths {
            if let Some(&target_idx) = module_index.get(path) {
                if target_idx != source_idx {
                    links.push((source_idx, target_idx));
                }
            }
        }
    }

    for (source_idx, target_idx) in links {
        let target_name = items[target_idx].name.clone();
        let source_name = items[source_idx].name.clone();
        push_unique(&mut items[source_idx].used_modules, &target_name);
        push_unique(&mut items[target_idx].used_in_modules, &source_name);
    }
}

fn owners_by_path(items: &[FeatureMapItem]) -> FxHashMap<String, Vec<(EntityKind, String)>> {
    let mut owners: FxHashMap<String, Vec<(EntityKind, String)>> = FxHashMap::default();
    for item in items {
        if matches!(item.kind, EntityKind::Screen | EntityKind::Component) {
            owners
                .entry(item.path.clone())
                .or_default()
                .push((item.kind, item.name.clone()));
        }
    }
    owners
}
