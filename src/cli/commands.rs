use crate::core::{models::*, services::*};
use crate::infrastructure::TokioFileSystemService;
use crate::utils::{ConfigLoader, Logger, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pagepack")]
#[command(about = "Assembles bundler configuration for multi-page sites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
    /// Run task: `dev` or `build`; anything else assembles the base config
    #[arg(short, long, env = "npm_lifecycle_event")]
    pub mode: Option<String>,
}

impl ProjectArgs {
    fn build_mode(&self) -> BuildMode {
        self.mode.as_deref().map(BuildMode::from_task).unwrap_or_default()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the assembled bundler configuration as JSON
    Config {
        #[command(flatten)]
        project: ProjectArgs,
        /// Dev server host override
        #[arg(long)]
        host: Option<String>,
        /// Dev server port override
        #[arg(short, long)]
        port: Option<u16>,
        /// Write the configuration to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List discovered page templates
    Pages {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
    /// Run pre-build hooks (clean the output directory)
    PreBuild {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Run post-build hooks after the bundler finished
    PostBuild {
        #[command(flatten)]
        project: ProjectArgs,
        /// The bundler reported a failed build
        #[arg(long)]
        failed: bool,
    },
    /// Write an example pagepack.config.json
    Init {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        Logger::init();

        let cli = Cli::parse();

        let result = match cli.command {
            Commands::Config { project, host, port, out } => {
                self.handle_config_command(&project, host, port, out.as_deref()).await
            }
            Commands::Pages { root } => self.handle_pages_command(&root).await,
            Commands::PreBuild { project } => self.handle_pre_build_command(&project).await,
            Commands::PostBuild { project, failed } => {
                self.handle_post_build_command(&project, failed).await
            }
            Commands::Init { root, force } => self.handle_init_command(&root, force),
        };

        if let Err(e) = &result {
            Logger::error(&e.to_string());
        }
        result
    }

    fn assembler(&self, layout: ProjectLayout) -> ConfigAssembler {
        ConfigAssembler::new(Arc::new(TokioFileSystemService), layout)
    }

    async fn handle_config_command(
        &self,
        project: &ProjectArgs,
        host: Option<String>,
        port: Option<u16>,
        out: Option<&Path>,
    ) -> Result<()> {
        let layout = ConfigLoader::load_layout(&project.root, host, port)?;
        let assembly = self.assembler(layout).assemble(project.build_mode()).await?;
        log_summary(&assembly.config);
        let json = assembly.config.to_json_pretty()?;

        match out {
            Some(path) => {
                tokio::fs::write(path, json).await?;
                Logger::info(&format!("📝 Configuration written to {}", path.display()));
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    async fn handle_pages_command(&self, root: &Path) -> Result<()> {
        let layout = ConfigLoader::load_layout(root, None, None)?;
        let pages = self.assembler(layout).discover_pages().await?;

        if pages.is_empty() {
            println!("  {}", "no page templates found".yellow());
            return Ok(());
        }

        for page in &pages {
            println!(
                "  {} {}",
                page.file_name.bright_cyan(),
                page.template_path.display().to_string().dimmed()
            );
        }

        Ok(())
    }

    async fn handle_pre_build_command(&self, project: &ProjectArgs) -> Result<()> {
        let layout = ConfigLoader::load_layout(&project.root, None, None)?;
        let assembly = self.assembler(layout).assemble(project.build_mode()).await?;

        if assembly.hooks.is_empty() {
            Logger::info(&format!("No pre-build hooks for mode {}", assembly.config.mode));
            return Ok(());
        }

        assembly.run_pre_build()
    }

    async fn handle_post_build_command(&self, project: &ProjectArgs, failed: bool) -> Result<()> {
        let layout = ConfigLoader::load_layout(&project.root, None, None)?;
        let assembly = self.assembler(layout).assemble(project.build_mode()).await?;

        let outcome = if failed {
            BuildOutcome::failed(vec!["bundler reported a failed build".to_string()])
        } else {
            BuildOutcome::succeeded()
        };

        if assembly.hooks.is_empty() {
            Logger::info(&format!("No post-build hooks for mode {}", assembly.config.mode));
            return Ok(());
        }

        assembly.run_post_build(&outcome)?;

        if outcome.success {
            println!("{} post-build hooks: {}", "✓".green(), assembly.hooks.plugin_names().join(", "));
        }
        Ok(())
    }

    fn handle_init_command(&self, root: &Path, force: bool) -> Result<()> {
        let path = ConfigLoader::write_example(root, force)?;
        println!("{} created {}", "✓".green(), path.display());
        Ok(())
    }
}

/// One-line-per-concern overview of the assembled configuration
fn log_summary(config: &BuildConfig) {
    Logger::info(&format!("📦 Mode: {}", config.mode));
    Logger::info(&format!(
        "🎨 CSS: {}",
        config.module_rules.css.pipeline.collaborators().join(" → ")
    ));
    if let Some(js) = &config.module_rules.js {
        Logger::info(&format!("⚙️  JS: {} ({})", js.loader, js.presets.join(", ")));
    }
    if let Some(output) = &config.output {
        Logger::info(&format!(
            "📁 Output: {}",
            output.path.join(output.filename.as_str()).display()
        ));
    }
    if let Some(server) = &config.dev_server {
        Logger::info(&format!("🌐 Dev server: http://{}", server.address()));
    }
    Logger::info(&format!("📄 Pages: {}", config.pages().count()));
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
