//! Static reference analysis over a set of TypeScript/TSX source files.
//!
//! The analyzer parses each target file with OXC, harvests its top-level
//! import declarations, categorizes internal imports by path pattern, and
//! verifies actual usage before recording a reference: components must appear
//! as JSX tags and actions as call targets, while module imports count by
//! inclusion alone. The result is a sparse per-file usage map plus an
//! inverted reference index.

mod resolve;
mod visitor;

use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{ImportDeclarationSpecifier, Statement};
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use tracing::{debug, warn};

use crate::error::{FmapError, Result};
use crate::model::{push_unique, FileUsage, ReferenceAnalysisResult};
use crate::patterns::{ImportCategory, PathPatterns};

use resolve::resolve_module_path;
use visitor::UsageVisitor;

/// Options for constructing a [`ReferenceAnalyzer`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    /// Optional `tsconfig.json` path used to discover the import alias
    /// prefix from `compilerOptions.paths`. When absent, `@/` is assumed.
    pub tsconfig: Option<PathBuf>,
    /// Path-pattern lists for import categorization.
    pub patterns: PathPatterns,
}

/// Analyzes import usage across a fixed set of project source files.
///
/// Only the target files are ever loaded; the analyzer does not follow the
/// dependency graph. Each file is parsed into its own arena allocation that
/// is released as soon as that file's analysis finishes.
#[derive(Debug)]
pub struct ReferenceAnalyzer {
    project_root: PathBuf,
    patterns: PathPatterns,
    alias_prefix: String,
}

impl ReferenceAnalyzer {
    /// Create an analyzer rooted at `project_root`.
    ///
    /// This is the only fallible step of the analysis pipeline: a tsconfig
    /// that cannot be read or parsed is a terminal error, since the analyzer
    /// has no module-resolution context without it.
    pub fn new(project_root: impl Into<PathBuf>, options: AnalyzerOptions) -> Result<Self> {
        let alias_prefix = match &options.tsconfig {
            Some(path) => load_alias_prefix(path)?,
            None => default_alias_prefix(),
        };
        Ok(Self {
            project_root: project_root.into(),
            patterns: options.patterns,
            alias_prefix,
        })
    }

    /// Analyze the given files and build the usage and reverse-reference maps.
    ///
    /// Files are processed in lexicographic path order so that relationship
    /// insertion order, and therefore the final artifact, is deterministic.
    /// Unreadable or unparseable files are skipped with a warning.
    pub fn analyze(&self, files: &[PathBuf]) -> ReferenceAnalysisResult {
        let mut targets: Vec<(String, PathBuf)> = files
            .iter()
            .map(|path| (self.relative_path(path), self.absolute_path(path)))
            .collect();
        targets.sort_by(|a, b| a.0.cmp(&b.0));
        targets.dedup_by(|a, b| a.0 == b.0);

        let mut result = ReferenceAnalysisResult::default();
        for (rel_path, abs_path) in targets {
            let source = match fs::read_to_string(&abs_path) {
                Ok(source) => source,
                Err(error) => {
                    warn!(path = %rel_path, %error, "skipping unreadable source file");
                    continue;
                }
            };
            if let Some(usage) = self.analyze_source(&rel_path, &source) {
                result.references.record(&usage);
                result.file_usages.insert(rel_path, usage);
            }
        }
        debug!(files = result.file_usages.len(), "reference analysis complete");
        result
    }

    /// Analyze a single file's source text. Returns `None` when the file has
    /// no detected usage in any category (sparse representation) or when it
    /// cannot be parsed.
    pub fn analyze_source(&self, rel_path: &str, source: &str) -> Option<FileUsage> {
        let source_type = SourceType::from_path(rel_path).unwrap_or_else(|_| SourceType::tsx());
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, source_type).parse();
        if !parsed.errors.is_empty() {
            warn!(path = %rel_path, errors = parsed.errors.len(), "skipping unparseable source file");
            return None;
        }
        let program = parsed.program;

        let mut usage = FileUsage::new(rel_path);
        let mut component_candidates: Vec<String> = Vec::new();
        let mut action_candidates: Vec<String> = Vec::new();

        for statement in &program.body {
            let Statement::ImportDeclaration(import) = statement else {
                continue;
            };
            if import.import_kind.is_type() {
                continue;
            }
            let specifier = import.source.value.as_str();
            if !self.is_internal_specifier(specifier) {
                continue;
            }

            let category = self.patterns.categorize(specifier);
            if category == ImportCategory::Module {
                // Module relationships are tracked by resolved file path in
                // addition to symbol names; side-effect imports still count.
                if let Some(path) = resolve_module_path(rel_path, specifier, &self.alias_prefix) {
                    push_unique(&mut usage.used_module_paths, &path);
                }
            }

            let Some(specifiers) = &import.specifiers else {
                continue;
            };
            for imported in specifiers {
                let Some(local) = runtime_local_name(imported) else {
                    continue;
                };
                match category {
                    ImportCategory::Component => push_unique(&mut component_candidates, local),
                    ImportCategory::Action => push_unique(&mut action_candidates, local),
                    ImportCategory::Module => push_unique(&mut usage.used_modules, local),
                    ImportCategory::None => {}
                }
            }
        }

        // Importing alone is not usage: components must render and actions
        // must be called before they are recorded.
        let mut usages = UsageVisitor::default();
        usages.visit_program(&program);
        for name in &component_candidates {
            if usages.jsx_tags.contains(name) {
                push_unique(&mut usage.used_components, name);
            }
        }
        for name in &action_candidates {
            if usages.call_targets.contains(name) {
                push_unique(&mut usage.used_actions, name);
            }
        }

        if usage.is_empty() {
            None
        } else {
            Some(usage)
        }
    }

    fn is_internal_specifier(&self, specifier: &str) -> bool {
        specifier.starts_with('.') || specifier.starts_with(&self.alias_prefix)
    }

    fn relative_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.project_root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }

    fn absolute_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

fn default_alias_prefix() -> String {
    "@/".to_string()
}

/// Read the alias prefix from a tsconfig's `compilerOptions.paths` table.
///
/// The first wildcard mapping (a key ending in `/*`) wins; a tsconfig with
/// no paths table falls back to the `@/` convention. Unreadable or malformed
/// configuration is terminal.
fn load_alias_prefix(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|error| FmapError::CompilerConfig {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&strip_comments(&text)).map_err(|error| FmapError::CompilerConfig {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    let paths = value
        .get("compilerOptions")
        .and_then(|options| options.get("paths"))
        .and_then(|paths| paths.as_object());
    if let Some(paths) = paths {
        for key in paths.keys() {
            if let Some(prefix) = key.strip_suffix('*') {
                if prefix.ends_with('/') {
                    return Ok(prefix.to_string());
                }
            }
        }
    }
    Ok(default_alias_prefix())
}

/// Strip `//` and `/* */` comments so tsconfig's JSONC dialect parses as JSON.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
            out.push('"');
        } else if ch == '/' && chars.peek() == Some(&'/') {
            for skipped in chars.by_ref() {
                if skipped == '\n' {
                    out.push('\n');
                    break;
                }
            }
        } else if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = '\0';
            for skipped in chars.by_ref() {
                if prev == '*' && skipped == '/' {
                    break;
                }
                prev = skipped;
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn runtime_local_name<'a>(specifier: &'a ImportDeclarationSpecifier<'a>) -> Option<&'a str> {
    match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(named) => {
            if named.import_kind.is_type() {
                None
            } else {
                Some(named.local.name.as_str())
            }
        }
        ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
            Some(default.local.name.as_str())
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
            Some(namespace.local.name.as_str())
        }
    }
}
