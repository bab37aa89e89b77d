//! Preflight check: is the packaging tool actually installed?
//!
//! Run before a build (or via `packwright preflight`) so a missing tool is
//! reported up front instead of as a spawn failure mid-build.

use std::path::PathBuf;

use crate::config::OrchestratorConfig;

/// Outcome of the tool availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCheck {
    /// Tool resolved on PATH (or was given as an existing path).
    Found { path: PathBuf },
    /// Tool could not be resolved.
    Missing { tool: String },
}

impl ToolCheck {
    pub fn is_found(&self) -> bool {
        matches!(self, ToolCheck::Found { .. })
    }
}

/// Resolve the configured packaging tool.
pub fn check_tool(config: &OrchestratorConfig) -> ToolCheck {
    match which::which(&config.tool) {
        Ok(path) => ToolCheck::Found { path },
        Err(_) => ToolCheck::Missing {
            tool: config.tool.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_tool_is_found() {
        let mut config = OrchestratorConfig::new("/tmp");
        config.tool = "sh".to_string();
        assert!(check_tool(&config).is_found());
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let mut config = OrchestratorConfig::new("/tmp");
        config.tool = "nonexistent_packager_12345".to_string();
        assert_eq!(
            check_tool(&config),
            ToolCheck::Missing {
                tool: "nonexistent_packager_12345".to_string()
            }
        );
    }
}
