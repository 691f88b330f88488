//! Annotation extraction from custom JSDoc tags.
//!
//! The extractor scans raw source text for `/** ... */` blocks and recognizes
//! a fixed tag vocabulary (`@screen`, `@component`, `@serverAction`,
//! `@module`, `@dbTable`, plus scalar and list tags). It never fails on
//! arbitrary input; malformed tags are simply skipped.

use crate::model::{push_unique, EntityKind, FeatureMapItem, ModuleMetadata, UNKNOWN_APP};

/// Output of scanning one file for annotations.
#[derive(Debug, Default, Clone)]
pub struct ExtractedAnnotations {
    /// Entity drafts declared by the file, in source order.
    pub items: Vec<FeatureMapItem>,
    /// Auxiliary module metadata keyed by the path-derived module name.
    pub metadata: ModuleMetadata,
}

/// Extract annotated entities and module metadata from raw file text.
///
/// `path` is the file path relative to the project root; it becomes the
/// `path` of every produced item and drives app/module-name inference.
pub fn extract_annotations(source: &str, path: &str) -> ExtractedAnnotations {
    let mut result = ExtractedAnnotations::default();
    let inferred_app = infer_app(path);
    let module_name = module_name_from_path(path);
    let mut declares_module = false;

    for block in jsdoc_blocks(source) {
        let parsed = parse_block(&block);
        if parsed.entities.iter().any(|(kind, _)| *kind == EntityKind::Module) {
            declares_module = true;
        }

        for (kind, name) in &parsed.entities {
            let mut item = FeatureMapItem::new(*kind, name.clone(), path);
            item.feature = parsed.feature.clone();
            item.app = parsed
                .app
                .clone()
                .unwrap_or_else(|| inferred_app.clone());
            item.used_components = parsed.used_components.clone();
            item.used_actions = parsed.used_actions.clone();
            item.used_in_screens = parsed.used_in_screens.clone();
            item.used_in_components = parsed.used_in_components.clone();
            item.used_in_actions = parsed.used_in_actions.clone();
            item.used_in_middleware = parsed.used_in_middleware.clone();
            item.used_in_layouts = parsed.used_in_layouts.clone();
            item.used_modules = parsed.used_modules.clone();
            item.used_in_modules = parsed.used_in_modules.clone();
            item.db_tables = parsed.db_tables.clone();
            result.items.push(item);
        }

        if let Some(description) = parsed.description {
            result
                .metadata
                .descriptions
                .entry(module_name.clone())
                .or_insert(description);
        }
        if !parsed.types.is_empty() {
            let entry = result.metadata.types.entry(module_name.clone()).or_default();
            for value in &parsed.types {
                push_unique(entry, value);
            }
        }
        if !parsed.utilities.is_empty() {
            let entry = result
                .metadata
                .utilities
                .entry(module_name.clone())
                .or_default();
            for value in &parsed.utilities {
                push_unique(entry, value);
            }
        }
    }

    // Metadata only makes sense for files that actually declare a module.
    if !declares_module {
        result.metadata = ModuleMetadata::default();
    }

    result
}

/// Derive the owning app name from an `apps/<name>/` path segment.
pub fn infer_app(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    if let Some(idx) = segments.iter().position(|segment| *segment == "apps") {
        if let Some(app) = segments.get(idx + 1) {
            if !app.is_empty() {
                return (*app).to_string();
            }
        }
    }
    UNKNOWN_APP.to_string()
}

/// Pure path-to-name projection for module metadata grouping.
///
/// Takes the path after the last `lib/` segment with the extension stripped,
/// falling back to the file stem for files outside any `lib/` directory.
pub fn module_name_from_path(path: &str) -> String {
    let without_ext = path
        .strip_suffix(".tsx")
        .or_else(|| path.strip_suffix(".ts"))
        .unwrap_or(path);
    let segments: Vec<&str> = without_ext.split('/').collect();
    if let Some(idx) = segments.iter().rposition(|segment| *segment == "lib") {
        let tail = &segments[idx + 1..];
        if !tail.is_empty() {
            return tail.join("/");
        }
    }
    segments.last().copied().unwrap_or(without_ext).to_string()
}

#[derive(Debug, Default)]
struct ParsedBlock {
    entities: Vec<(EntityKind, String)>,
    feature: Option<String>,
    app: Option<String>,
    description: Option<String>,
    used_components: Vec<String>,
    used_actions: Vec<String>,
    used_in_screens: Vec<String>,
    used_in_components: Vec<String>,
    used_in_actions: Vec<String>,
    used_in_middleware: Vec<String>,
    used_in_layouts: Vec<String>,
    used_modules: Vec<String>,
    used_in_modules: Vec<String>,
    db_tables: Vec<String>,
    types: Vec<String>,
    utilities: Vec<String>,
}

/// Yields the inner text of every `/** ... */` block in source order.
fn jsdoc_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut rest = source;
    while let Some(start) = rest.find("/**") {
        let after = &rest[start + 3..];
        match after.find("*/") {
            Some(end) => {
                blocks.push(after[..end].to_string());
                rest = &after[end + 2..];
            }
            None => break, // unterminated comment; nothing more to scan
        }
    }
    blocks
}

fn parse_block(raw: &str) -> ParsedBlock {
    let mut parsed = ParsedBlock::default();
    let lines = normalize_lines(raw);

    let mut idx = 0;
    while idx < lines.len() {
        let line = &lines[idx];
        if let Some(rest) = line.strip_prefix('@') {
            let (tag, payload) = split_tag_payload(rest);
            match tag {
                "screen" => push_entity(&mut parsed, EntityKind::Screen, payload),
                "component" => push_entity(&mut parsed, EntityKind::Component, payload),
                "serverAction" => push_entity(&mut parsed, EntityKind::Action, payload),
                "module" => push_entity(&mut parsed, EntityKind::Module, payload),
                "dbTable" => push_entity(&mut parsed, EntityKind::Table, payload),
                "feature" => {
                    let value = payload.trim();
                    if !value.is_empty() {
                        parsed.feature = Some(value.to_string());
                    }
                }
                "app" => {
                    if let Some(value) = first_token(payload) {
                        parsed.app = Some(value.to_string());
                    }
                }
                "description" => {
                    // Description may continue over following non-tag lines.
                    let mut text_lines = Vec::new();
                    if !payload.trim().is_empty() {
                        text_lines.push(payload.trim().to_string());
                    }
                    while idx + 1 < lines.len() && !lines[idx + 1].starts_with('@') {
                        idx += 1;
                        if !lines[idx].is_empty() {
                            text_lines.push(lines[idx].clone());
                        }
                    }
                    let text = text_lines.join(" ").trim().to_string();
                    if !text.is_empty() {
                        parsed.description = Some(text);
                    }
                }
                "usedComponents" => extend_list(&mut parsed.used_components, payload),
                "usedActions" => extend_list(&mut parsed.used_actions, payload),
                "usedInScreens" => extend_list(&mut parsed.used_in_screens, payload),
                "usedInComponents" => extend_list(&mut parsed.used_in_components, payload),
                "usedInActions" => extend_list(&mut parsed.used_in_actions, payload),
                "usedInMiddleware" => extend_list(&mut parsed.used_in_middleware, payload),
                "usedInLayouts" => extend_list(&mut parsed.used_in_layouts, payload),
                "usedModules" => extend_list(&mut parsed.used_modules, payload),
                "usedInModules" => extend_list(&mut parsed.used_in_modules, payload),
                "dbTables" => extend_list(&mut parsed.db_tables, payload),
                "types" => extend_list(&mut parsed.types, payload),
                "utilities" => extend_list(&mut parsed.utilities, payload),
                _ => {} // unknown tags are not an error
            }
        }
        idx += 1;
    }

    parsed
}

fn push_entity(parsed: &mut ParsedBlock, kind: EntityKind, payload: &str) {
    if let Some(name) = first_token(payload) {
        parsed.entities.push((kind, name.to_string()));
    }
}

fn extend_list(list: &mut Vec<String>, payload: &str) {
    for value in payload.split(',') {
        let value = value.trim();
        if !value.is_empty() {
            push_unique(list, value);
        }
    }
}

fn first_token(payload: &str) -> Option<&str> {
    payload.split_whitespace().next()
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}

fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}
