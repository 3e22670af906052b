// Output Cleaner: empties the distribution directory before a build

use crate::core::models::PluginSpec;
use crate::core::plugin::{Plugin, PluginContext};
use crate::utils::{resolve_path, Logger, PagepackError, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Removes the distribution directory so stale hashed files do not pile up
///
/// Refuses to run when the directory is the project root, lies above it, or
/// holds any of the build's own inputs.
pub struct OutputCleaner {
    path: PathBuf,
}

impl OutputCleaner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn refuse(&self, reason: String) -> PagepackError {
        PagepackError::Clean {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, reason),
        }
    }

    fn clean_error(&self, source: io::Error) -> PagepackError {
        PagepackError::Clean {
            path: self.path.clone(),
            source,
        }
    }

    /// Reject targets that would take sources with them
    fn check_target(&self, target: &Path, context: &PluginContext) -> Result<()> {
        let root = resolve_path(context.root).map_err(|e| self.clean_error(e))?;
        if root.starts_with(target) {
            return Err(self.refuse("output directory contains the project root".to_string()));
        }

        for input in build_inputs(context) {
            let resolved = resolve_path(&input).map_err(|e| self.clean_error(e))?;
            if resolved.starts_with(target) {
                return Err(self.refuse(format!(
                    "output directory contains build input {}",
                    input.display()
                )));
            }
        }

        Ok(())
    }
}

/// Entry script, page templates and copied asset sources
fn build_inputs(context: &PluginContext) -> Vec<PathBuf> {
    let config = context.config;
    let mut inputs = vec![config.entry.clone()];
    inputs.extend(config.pages().map(|page| page.template_path.clone()));
    inputs.extend(config.plugins.iter().filter_map(|plugin| match plugin {
        PluginSpec::CopyAssets { from, .. } => Some(from.clone()),
        _ => None,
    }));
    inputs
}

impl Plugin for OutputCleaner {
    fn name(&self) -> &str {
        "output-cleaner"
    }

    fn on_build_start(&self, context: &PluginContext) -> Result<()> {
        if !self.path.exists() {
            Logger::debug(&format!("Nothing to clean at {}", self.path.display()));
            return Ok(());
        }

        let target = self.path.canonicalize().map_err(|e| self.clean_error(e))?;
        self.check_target(&target, context)?;

        std::fs::remove_dir_all(&target).map_err(|e| self.clean_error(e))?;

        Logger::info(&format!("🧹 Cleaned {}", self.path.display()));
        Ok(())
    }
}
