//! Import categorization against ordered path-pattern lists.

use serde::{Deserialize, Serialize};

/// Category assigned to an import specifier by path-pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportCategory {
    Component,
    Action,
    Module,
    /// Specifier matched no pattern list.
    None,
}

/// Ordered substring-pattern lists used to categorize import specifiers.
///
/// Categorization is a pure function of the specifier string. The lists are
/// checked in priority order component, action, module; a specifier matching
/// a component pattern is never considered for the later categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathPatterns {
    pub component_patterns: Vec<String>,
    pub action_patterns: Vec<String>,
    pub module_patterns: Vec<String>,
}

impl Default for PathPatterns {
    fn default() -> Self {
        Self {
            component_patterns: vec!["/components/".to_string()],
            action_patterns: vec!["/lib/actions/".to_string(), "/actions/".to_string()],
            module_patterns: vec!["/lib/".to_string()],
        }
    }
}

impl PathPatterns {
    /// Categorize a module specifier. Expects the caller to have filtered out
    /// bare-package specifiers already; this function only pattern-matches.
    pub fn categorize(&self, specifier: &str) -> ImportCategory {
        if matches_any(specifier, &self.component_patterns) {
            return ImportCategory::Component;
        }
        if matches_any(specifier, &self.action_patterns) {
            return ImportCategory::Action;
        }
        // The default module pattern `/lib/` would also match `/lib/actions/`,
        // but action patterns have already claimed those specifiers above.
        if matches_any(specifier, &self.module_patterns) {
            return ImportCategory::Module;
        }
        ImportCategory::None
    }
}

fn matches_any(specifier: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| specifier.contains(pattern))
}
