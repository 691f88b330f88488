//! Module-path resolution for alias-rooted and relative import specifiers.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Resolve a module import specifier to a project-relative file path.
///
/// Alias-rooted specifiers are rejoined under the nearest `apps/<name>/`
/// segment of the importing file's own path; relative specifiers resolve
/// against the importing file's directory. Returns `None` for specifiers
/// that cannot be resolved (an alias with no enclosing app directory), which
/// callers treat as a silent skip.
pub(super) fn resolve_module_path(
    importer: &str,
    specifier: &str,
    alias_prefix: &str,
) -> Option<String> {
    let joined = if let Some(rest) = specifier.strip_prefix(alias_prefix) {
        let app_root = enclosing_app_root(importer)?;
        PathBuf::from(app_root).join(rest)
    } else if specifier.starts_with('.') {
        Path::new(importer).parent()?.join(specifier)
    } else {
        return None;
    };

    let cleaned = joined.clean();
    let normalized = cleaned.to_string_lossy().replace('\\', "/");
    Some(ensure_source_extension(normalized))
}

/// Returns the `apps/<name>` prefix of the importing file's path, if any.
fn enclosing_app_root(importer: &str) -> Option<String> {
    let segments: Vec<&str> = importer.split('/').collect();
    let idx = segments.iter().position(|segment| *segment == "apps")?;
    let app = segments.get(idx + 1)?;
    if app.is_empty() {
        return None;
    }
    Some(segments[..=idx + 1].join("/"))
}

fn ensure_source_extension(path: String) -> String {
    if Path::new(&path).extension().is_some() {
        return path;
    }
    format!("{path}.ts")
}
