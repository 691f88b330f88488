//! End-to-end pipeline: extract annotations, analyze references, merge,
//! and assemble the feature map.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analyzer::{AnalyzerOptions, ReferenceAnalyzer};
use crate::annotations::extract_annotations;
use crate::builder::build_feature_map;
use crate::error::Result;
use crate::merge::merge_references;
use crate::model::{FeatureMap, FeatureMapItem, ModuleMetadata};

/// Run the full generation pipeline over the given source files.
///
/// Files are visited in lexicographic path order in both phases so the
/// result is deterministic apart from the `generatedAt` stamp. Unreadable
/// files are skipped with a warning in both phases; the only terminal error
/// is analyzer initialization (a broken tsconfig).
pub fn generate_feature_map(
    project_root: impl AsRef<Path>,
    files: &[PathBuf],
    options: AnalyzerOptions,
) -> Result<FeatureMap> {
    let project_root = project_root.as_ref();
    let analyzer = ReferenceAnalyzer::new(project_root, options)?;

    let mut sorted: Vec<PathBuf> = files.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut items: Vec<FeatureMapItem> = Vec::new();
    let mut metadata = ModuleMetadata::default();
    for path in &sorted {
        let abs = if path.is_absolute() {
            path.clone()
        } else {
            project_root.join(path)
        };
        let rel = path
            .strip_prefix(project_root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let source = match fs::read_to_string(&abs) {
            Ok(source) => source,
            Err(error) => {
                warn!(path = %rel, %error, "skipping unreadable source file");
                continue;
            }
        };
        let extracted = extract_annotations(&source, &rel);
        items.extend(extracted.items);
        metadata.extend(extracted.metadata);
    }
    debug!(items = items.len(), "annotation extraction complete");

    let analysis = analyzer.analyze(&sorted);
    merge_references(&mut items, &analysis);

    Ok(build_feature_map(items, metadata))
}
