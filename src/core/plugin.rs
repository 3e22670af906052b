// Lifecycle hooks run around the external bundler's build

use crate::core::models::{BuildConfig, BuildOutcome};
use crate::utils::Result;
use std::path::Path;
use std::sync::Arc;

/// Context provided to plugins during execution
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    /// Project root directory
    pub root: &'a Path,
    /// Configuration handed to the bundler
    pub config: &'a BuildConfig,
}

impl<'a> PluginContext<'a> {
    pub fn new(root: &'a Path, config: &'a BuildConfig) -> Self {
        Self { root, config }
    }
}

/// Side effect attached to the bundler's build lifecycle
///
/// The host calls `on_build_start` before writing any artifact and
/// `on_build_end` once its own completion event has fired.
pub trait Plugin: Send + Sync {
    /// Unique name for this plugin
    fn name(&self) -> &str;

    /// Called before the build starts
    fn on_build_start(&self, _context: &PluginContext) -> Result<()> {
        Ok(())
    }

    /// Called after the build finished (success or failure)
    fn on_build_end(&self, _context: &PluginContext, _outcome: &BuildOutcome) -> Result<()> {
        Ok(())
    }
}

/// Manages plugin registration and execution
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginManager {
    /// Create a new empty plugin manager
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Get number of registered plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Names in registration order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Execute on_build_start hook for all plugins
    pub fn on_build_start(&self, context: &PluginContext) -> Result<()> {
        for plugin in &self.plugins {
            plugin.on_build_start(context)?;
        }
        Ok(())
    }

    /// Execute on_build_end hook for all plugins
    pub fn on_build_end(&self, context: &PluginContext, outcome: &BuildOutcome) -> Result<()> {
        for plugin in &self.plugins {
            plugin.on_build_end(context, outcome)?;
        }
        Ok(())
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
