use crate::core::{interfaces::*, models::*, plugin::{PluginContext, PluginManager}};
use crate::plugins::{AssetCopier, OutputCleaner};
use crate::utils::{Logger, PagepackError, Result, Timer};
use std::sync::Arc;

/// Assembled configuration plus the hooks the host runs around its build
pub struct Assembly {
    pub config: BuildConfig,
    pub hooks: PluginManager,
    root: std::path::PathBuf,
}

impl Assembly {
    /// Run pre-build hooks; the host calls this before writing artifacts
    pub fn run_pre_build(&self) -> Result<()> {
        let context = PluginContext::new(&self.root, &self.config);
        self.hooks.on_build_start(&context)
    }

    /// Run post-build hooks once the host reports completion
    pub fn run_post_build(&self, outcome: &BuildOutcome) -> Result<()> {
        let context = PluginContext::new(&self.root, &self.config);
        self.hooks.on_build_end(&context, outcome)
    }
}

/// Builds the bundler configuration for a project layout
pub struct ConfigAssembler {
    fs_service: Arc<dyn FileSystemService>,
    layout: ProjectLayout,
}

impl ConfigAssembler {
    pub fn new(fs_service: Arc<dyn FileSystemService>, layout: ProjectLayout) -> Self {
        Self { fs_service, layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// List the page directory and keep the HTML templates, sorted by name
    pub async fn discover_pages(&self) -> Result<Vec<PageDescriptor>> {
        let dir = self.layout.page_dir();

        let names = self.fs_service.list_files(&dir).await.map_err(|e| match e {
            PagepackError::Io(source) => PagepackError::discovery(&dir, source),
            other => other,
        })?;

        let mut pages: Vec<PageDescriptor> = names
            .iter()
            .filter_map(|name| PageDescriptor::from_listing(&dir, name))
            .collect();
        pages.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Logger::pages_found(pages.len(), &dir.display().to_string());
        Ok(pages)
    }

    pub async fn assemble(&self, mode: BuildMode) -> Result<Assembly> {
        let _timer = Timer::start("assemble configuration");
        Logger::assembling(mode.as_str(), &self.layout.root.display().to_string());

        let pages = self.discover_pages().await?;

        let entry = self.layout.entry_path();
        if !self.fs_service.file_exists(&entry).await {
            Logger::warn(&format!("Entry file not found: {}", entry.display()));
        }

        let config = build_config(mode, &self.layout, &pages);
        let hooks = lifecycle_hooks(&config);
        Logger::debug(&format!(
            "Assembled {} plugin(s), {} lifecycle hook(s)",
            config.plugins.len(),
            hooks.plugin_count()
        ));

        Ok(Assembly {
            config,
            hooks,
            root: self.layout.root.clone(),
        })
    }
}

/// Pure assembly: the record depends only on the mode, the layout and the pages
pub fn build_config(mode: BuildMode, layout: &ProjectLayout, pages: &[PageDescriptor]) -> BuildConfig {
    let page_plugins = pages.iter().cloned().map(PluginSpec::HtmlPage);

    match mode {
        BuildMode::Development => BuildConfig {
            mode,
            entry: layout.entry_path(),
            output: Some(OutputSpec {
                filename: FilenameTemplate::new(DEV_BUNDLE_NAME),
                chunk_filename: None,
                path: layout.page_dir(),
            }),
            module_rules: ModuleRules {
                css: CssRule::new(CssPipeline::base().with_front(CssStage::StyleInject)),
                js: None,
            },
            plugins: page_plugins.collect(),
            dev_server: Some(DevServerSpec {
                host: layout.host.clone(),
                port: layout.port,
                hot: true,
                content_base: layout.page_dir(),
                watch: WatchRule {
                    root: layout.page_dir(),
                    extension: "html".to_string(),
                },
            }),
            optimization: None,
        },
        BuildMode::Production => BuildConfig {
            mode,
            entry: layout.entry_path(),
            output: Some(OutputSpec {
                filename: FilenameTemplate::new(HASHED_CHUNK_NAME),
                chunk_filename: Some(FilenameTemplate::new(HASHED_CHUNK_NAME)),
                path: layout.output_dir(),
            }),
            module_rules: ModuleRules {
                css: CssRule::new(
                    CssPipeline::base()
                        .with_front(CssStage::Extract)
                        .with_back(CssStage::Minify),
                ),
                js: Some(JsRule::with_preset_env()),
            },
            plugins: page_plugins
                .chain([
                    PluginSpec::CleanOutput {
                        path: layout.output_dir(),
                    },
                    PluginSpec::ExtractCss {
                        filename: FilenameTemplate::new(HASHED_STYLES_NAME),
                    },
                    PluginSpec::CopyAssets {
                        from: layout.images_source(),
                        to: layout.images_destination(),
                    },
                ])
                .collect(),
            dev_server: None,
            optimization: Some(OptimizationSpec::split_all()),
        },
        BuildMode::Unspecified => BuildConfig {
            mode,
            entry: layout.entry_path(),
            output: None,
            module_rules: ModuleRules {
                css: CssRule::new(CssPipeline::base()),
                js: None,
            },
            plugins: page_plugins.collect(),
            dev_server: None,
            optimization: None,
        },
    }
}

/// Hooks for the plugins that carry a lifecycle side effect
pub fn lifecycle_hooks(config: &BuildConfig) -> PluginManager {
    let mut hooks = PluginManager::new();

    for plugin in &config.plugins {
        match plugin {
            PluginSpec::CleanOutput { path } => {
                hooks.register(Arc::new(OutputCleaner::new(path.clone())));
            }
            PluginSpec::CopyAssets { from, to } => {
                hooks.register(Arc::new(AssetCopier::new(from.clone(), to.clone())));
            }
            PluginSpec::HtmlPage(_) | PluginSpec::ExtractCss { .. } => {}
        }
    }

    hooks
}
