use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Pattern selecting stylesheets for the CSS rule
pub const CSS_TEST: &str = r"(?i)\.css$";
/// Pattern selecting scripts for the JS rule
pub const JS_TEST: &str = r"\.js$";
/// Scripts under a dependency directory are never transformed
pub const JS_EXCLUDE: &str = r"(node_modules)";

pub const JS_LOADER: &str = "babel-loader";
pub const JS_PRESET: &str = "@babel/preset-env";

pub const DEV_BUNDLE_NAME: &str = "bundled.js";
pub const HASHED_CHUNK_NAME: &str = "[name].[chunkhash].js";
pub const HASHED_STYLES_NAME: &str = "styles.[chunkhash].css";

static CSS_TEST_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(CSS_TEST).unwrap());
static JS_TEST_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(JS_TEST).unwrap());
static JS_EXCLUDE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(JS_EXCLUDE).unwrap());

/// Artifact profile selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildMode {
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "production")]
    Production,
    /// Any task name other than the two recognised ones
    #[default]
    #[serde(rename = "none")]
    Unspecified,
}

impl BuildMode {
    /// Map a run task name (`dev`, `build`) to a mode
    pub fn from_task(task: &str) -> Self {
        match task.trim() {
            "dev" => BuildMode::Development,
            "build" => BuildMode::Production,
            _ => BuildMode::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
            BuildMode::Unspecified => "none",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTML template and the page emitted for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub file_name: String,
    pub template_path: PathBuf,
}

impl PageDescriptor {
    /// Build a descriptor from a directory listing entry, if it names a template
    pub fn from_listing(dir: &Path, name: &str) -> Option<Self> {
        if !name.ends_with(".html") {
            return None;
        }

        Some(Self {
            file_name: name.to_string(),
            template_path: dir.join(name),
        })
    }
}

/// A named step of the stylesheet pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "kebab-case")]
pub enum CssStage {
    /// Inject styles into the page at runtime
    StyleInject,
    /// Write styles to a separate file
    Extract,
    /// Resolve `@import`; `url()` references are left untouched when `url` is false
    Resolve { url: bool },
    Import,
    Mixins,
    SimpleVars,
    Nested,
    HexRgba,
    Autoprefix,
    Minify,
}

impl CssStage {
    /// Name of the external collaborator implementing this stage
    pub fn collaborator(&self) -> &'static str {
        match self {
            CssStage::StyleInject => "style-loader",
            CssStage::Extract => "mini-css-extract-plugin",
            CssStage::Resolve { .. } => "css-loader",
            CssStage::Import => "postcss-import",
            CssStage::Mixins => "postcss-mixins",
            CssStage::SimpleVars => "postcss-simple-vars",
            CssStage::Nested => "postcss-nested",
            CssStage::HexRgba => "postcss-hexrgba",
            CssStage::Autoprefix => "autoprefixer",
            CssStage::Minify => "cssnano",
        }
    }
}

/// Ordered stylesheet stages, first stage applied last by the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssPipeline(Vec<CssStage>);

impl CssPipeline {
    /// Stages shared by every mode
    pub fn base() -> Self {
        Self(vec![
            CssStage::Resolve { url: false },
            CssStage::Import,
            CssStage::Mixins,
            CssStage::SimpleVars,
            CssStage::Nested,
            CssStage::HexRgba,
            CssStage::Autoprefix,
        ])
    }

    pub fn with_front(mut self, stage: CssStage) -> Self {
        self.0.insert(0, stage);
        self
    }

    pub fn with_back(mut self, stage: CssStage) -> Self {
        self.0.push(stage);
        self
    }

    pub fn stages(&self) -> &[CssStage] {
        &self.0
    }

    /// Collaborator names in stage order
    pub fn collaborators(&self) -> Vec<&'static str> {
        self.0.iter().map(CssStage::collaborator).collect()
    }

    pub fn position(&self, stage: &CssStage) -> Option<usize> {
        self.0.iter().position(|s| s == stage)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssRule {
    pub test: String,
    #[serde(rename = "use")]
    pub pipeline: CssPipeline,
}

impl CssRule {
    pub fn new(pipeline: CssPipeline) -> Self {
        Self {
            test: CSS_TEST.to_string(),
            pipeline,
        }
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        CSS_TEST_REGEX.is_match(&path.to_string_lossy())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsRule {
    pub test: String,
    pub exclude: String,
    pub loader: String,
    pub presets: Vec<String>,
}

impl JsRule {
    pub fn with_preset_env() -> Self {
        Self {
            test: JS_TEST.to_string(),
            exclude: JS_EXCLUDE.to_string(),
            loader: JS_LOADER.to_string(),
            presets: vec![JS_PRESET.to_string()],
        }
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        JS_TEST_REGEX.is_match(&path) && !JS_EXCLUDE_REGEX.is_match(&path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRules {
    pub css: CssRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js: Option<JsRule>,
}

/// Output file name with `[name]` and `[chunkhash]` placeholders, filled in by the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenameTemplate(String);

impl FilenameTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub filename: FilenameTemplate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<FilenameTemplate>,
    pub path: PathBuf,
}

/// Files under `root` with `extension` trigger a full page reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRule {
    pub root: PathBuf,
    pub extension: String,
}

impl WatchRule {
    pub fn glob(&self) -> String {
        format!("{}/**/*.{}", self.root.display(), self.extension)
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
            && path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerSpec {
    pub host: String,
    pub port: u16,
    pub hot: bool,
    pub content_base: PathBuf,
    pub watch: WatchRule,
}

impl DevServerSpec {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSelection {
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitChunks {
    pub chunks: ChunkSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSpec {
    pub split_chunks: SplitChunks,
}

impl OptimizationSpec {
    pub fn split_all() -> Self {
        Self {
            split_chunks: SplitChunks {
                chunks: ChunkSelection::All,
            },
        }
    }
}

/// Plugin handed to the bundler, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginSpec {
    HtmlPage(PageDescriptor),
    CleanOutput { path: PathBuf },
    ExtractCss { filename: FilenameTemplate },
    CopyAssets { from: PathBuf, to: PathBuf },
}

impl PluginSpec {
    pub fn name(&self) -> &'static str {
        match self {
            PluginSpec::HtmlPage(_) => "html-page",
            PluginSpec::CleanOutput { .. } => "clean-output",
            PluginSpec::ExtractCss { .. } => "extract-css",
            PluginSpec::CopyAssets { .. } => "copy-assets",
        }
    }
}

/// The assembled bundler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub mode: BuildMode,
    pub entry: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSpec>,
    #[serde(rename = "module")]
    pub module_rules: ModuleRules,
    pub plugins: Vec<PluginSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationSpec>,
}

impl BuildConfig {
    pub fn pages(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.plugins.iter().filter_map(|plugin| match plugin {
            PluginSpec::HtmlPage(page) => Some(page),
            _ => None,
        })
    }

    pub fn to_json_pretty(&self) -> crate::utils::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Directory conventions of the project being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub app_dir: PathBuf,
    pub entry: PathBuf,
    pub dist_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Destination of the copied images, relative to `dist_dir`
    pub images_output: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::for_root(PathBuf::from("."))
    }
}

impl ProjectLayout {
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            app_dir: PathBuf::from("app"),
            entry: PathBuf::from("app/assets/scripts/App.js"),
            dist_dir: PathBuf::from("docs"),
            images_dir: PathBuf::from("app/assets/images"),
            images_output: PathBuf::from("assets/images"),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn page_dir(&self) -> PathBuf {
        self.resolve(&self.app_dir)
    }

    pub fn entry_path(&self) -> PathBuf {
        self.resolve(&self.entry)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.dist_dir)
    }

    pub fn images_source(&self) -> PathBuf {
        self.resolve(&self.images_dir)
    }

    pub fn images_destination(&self) -> PathBuf {
        self.output_dir().join(&self.images_output)
    }
}

/// Completion report from the host bundler
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub success: bool,
    pub errors: Vec<String>,
}

impl BuildOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}
