//! The `fmap generate` command: collect sources, run the pipeline, write
//! the feature-map JSON artifact.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::{info, warn};

use fmap_core::{generate_feature_map, AnalyzerOptions};

use crate::cli::GenerateArgs;
use crate::config::FmapConfig;

/// Execute the generate command.
pub fn generate_execute(args: GenerateArgs) -> anyhow::Result<()> {
    let root = args.root;
    let config = FmapConfig::load(&root, args.config.as_deref())?;

    let files = collect_files(&root, &config.include, &config.exclude)?;
    info!(files = files.len(), root = %root.display(), "collected source files");

    let tsconfig = args
        .tsconfig
        .or_else(|| config.tsconfig.as_ref().map(|path| root.join(path)))
        .or_else(|| {
            let default = root.join("tsconfig.json");
            default.exists().then_some(default)
        });
    let options = AnalyzerOptions {
        tsconfig,
        patterns: config.patterns,
    };

    let map = generate_feature_map(&root, &files, options)?;

    let json = serde_json::to_string_pretty(&map).context("failed to serialize feature map")?;
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
    }
    fs::write(&args.out, json)
        .with_context(|| format!("failed to write '{}'", args.out.display()))?;

    info!(
        features = map.features.len(),
        apps = map.apps.len(),
        out = %args.out.display(),
        "feature map written"
    );
    Ok(())
}

/// Collect TypeScript/TSX files under `root`, honoring include/exclude
/// globs. Results are project-relative and sorted for deterministic
/// downstream processing.
fn collect_files(root: &Path, include: &[String], exclude: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for glob in include {
        overrides
            .add(glob)
            .with_context(|| format!("invalid include glob '{glob}'"))?;
    }
    for glob in exclude {
        overrides
            .add(&format!("!{glob}"))
            .with_context(|| format!("invalid exclude glob '{glob}'"))?;
    }
    let overrides = overrides.build().context("failed to compile glob overrides")?;

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).overrides(overrides).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }
        let path = entry.into_path();
        let is_source = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("ts" | "tsx")
        );
        if is_source {
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            files.push(rel);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, "export {};\n").expect("write");
    }

    #[test]
    fn collects_only_matching_sources_in_sorted_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "apps/web/b.tsx");
        touch(dir.path(), "apps/web/a.ts");
        touch(dir.path(), "apps/web/readme.md");
        touch(dir.path(), "node_modules/pkg/index.ts");

        let config = FmapConfig::default();
        let files = collect_files(dir.path(), &config.include, &config.exclude).expect("collect");
        assert_eq!(
            files,
            vec![PathBuf::from("apps/web/a.ts"), PathBuf::from("apps/web/b.tsx")]
        );
    }

    #[test]
    fn exclude_globs_win_over_include() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "apps/web/page.tsx");
        touch(dir.path(), "apps/web/page.test.tsx");
        touch(dir.path(), "apps/web/types.d.ts");

        let config = FmapConfig::default();
        let files = collect_files(dir.path(), &config.include, &config.exclude).expect("collect");
        assert_eq!(files, vec![PathBuf::from("apps/web/page.tsx")]);
    }
}
