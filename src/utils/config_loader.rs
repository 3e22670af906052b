use crate::core::models::ProjectLayout;
use crate::utils::{Logger, PagepackError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pagepack.config.json";

/// Configuration file format (pagepack.config.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagepackConfig {
    /// Directory holding the HTML page templates (default: "app")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_dir: Option<String>,

    /// Script entry point (default: "app/assets/scripts/App.js")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Production output directory (default: "docs")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Image directory copied after production builds (default: "app/assets/images")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<String>,

    /// Image destination inside the output directory (default: "assets/images")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_output: Option<String>,

    /// Dev server host (default: "0.0.0.0")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Dev server port (default: 3000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Config loader that supports config files with CLI override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the project root if the file exists
    pub fn load_from_file(root: &Path) -> Result<Option<PagepackConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        let content = match std::fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE_NAME));
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Logger::debug(&format!("Loaded config from {}", config_path.display()));

        let config: PagepackConfig = serde_json::from_str(&content).map_err(|e| {
            PagepackError::config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
        })?;

        Ok(Some(config))
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(
        file_config: Option<PagepackConfig>,
        root: PathBuf,
        host: Option<String>,
        port: Option<u16>,
    ) -> ProjectLayout {
        let base = file_config.unwrap_or_default();
        let defaults = ProjectLayout::for_root(root);

        ProjectLayout {
            app_dir: base.app_dir.map(PathBuf::from).unwrap_or(defaults.app_dir),
            entry: base.entry.map(PathBuf::from).unwrap_or(defaults.entry),
            dist_dir: base.output_dir.map(PathBuf::from).unwrap_or(defaults.dist_dir),
            images_dir: base.images_dir.map(PathBuf::from).unwrap_or(defaults.images_dir),
            images_output: base
                .images_output
                .map(PathBuf::from)
                .unwrap_or(defaults.images_output),
            host: host.or(base.host).unwrap_or(defaults.host),
            port: port.or(base.port).unwrap_or(defaults.port),
            root: defaults.root,
        }
    }

    /// Load the file under `root` and apply CLI overrides
    pub fn load_layout(root: &Path, host: Option<String>, port: Option<u16>) -> Result<ProjectLayout> {
        let file_config = Self::load_from_file(root)?;
        Ok(Self::merge_with_cli(file_config, root.to_path_buf(), host, port))
    }

    /// Example config file spelling out every default
    pub fn generate_example() -> String {
        let defaults = ProjectLayout::default();
        let example = PagepackConfig {
            app_dir: Some(defaults.app_dir.display().to_string()),
            entry: Some(defaults.entry.display().to_string()),
            output_dir: Some(defaults.dist_dir.display().to_string()),
            images_dir: Some(defaults.images_dir.display().to_string()),
            images_output: Some(defaults.images_output.display().to_string()),
            host: Some(defaults.host),
            port: Some(defaults.port),
        };

        serde_json::to_string_pretty(&example).unwrap_or_default()
    }

    /// Write the example file; refuses to overwrite unless `force` is set
    pub fn write_example(root: &Path, force: bool) -> Result<PathBuf> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if config_path.exists() && !force {
            return Err(PagepackError::config(format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            )));
        }

        std::fs::write(&config_path, Self::generate_example())?;
        Ok(config_path)
    }
}
