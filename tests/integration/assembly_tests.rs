use pagepack::core::models::*;
use pagepack::core::services::ConfigAssembler;
use pagepack::infrastructure::TokioFileSystemService;
use pagepack::utils::{ConfigLoader, PagepackError};
use std::path::Path;
use std::sync::Arc;

fn seed_site(root: &Path, files: &[&str]) {
    let app = root.join("app");
    std::fs::create_dir_all(app.join("assets/scripts")).unwrap();
    std::fs::write(app.join("assets/scripts/App.js"), "console.log('hi');").unwrap();
    for file in files {
        std::fs::write(app.join(file), "<html></html>").unwrap();
    }
}

fn assembler(root: &Path) -> ConfigAssembler {
    ConfigAssembler::new(
        Arc::new(TokioFileSystemService),
        ProjectLayout::for_root(root),
    )
}

#[tokio::test]
async fn test_discovery_ignores_non_html() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path(), &["index.html", "about.html", "notes.txt"]);

    let pages = assembler(temp_dir.path()).discover_pages().await.unwrap();
    let names: Vec<&str> = pages.iter().map(|p| p.file_name.as_str()).collect();

    assert_eq!(names, vec!["about.html", "index.html"]);
    assert_eq!(pages[1].template_path, temp_dir.path().join("app/index.html"));
}

#[tokio::test]
async fn test_one_page_per_template() {
    let temp_dir = tempfile::tempdir().unwrap();
    let files = ["a.html", "b.html", "c.html", "d.html"];
    seed_site(temp_dir.path(), &files);

    let assembly = assembler(temp_dir.path())
        .assemble(BuildMode::Production)
        .await
        .unwrap();

    assert_eq!(assembly.config.pages().count(), files.len());
}

#[tokio::test]
async fn test_unreadable_page_dir_is_discovery_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    let result = assembler(temp_dir.path()).assemble(BuildMode::Development).await;

    match result {
        Err(err @ PagepackError::Discovery { .. }) => {
            assert!(err.to_string().contains("app"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("assembly should fail without a page directory"),
    }
}

#[tokio::test]
async fn test_development_assembly() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path(), &["index.html"]);

    let assembly = assembler(temp_dir.path())
        .assemble(BuildMode::Development)
        .await
        .unwrap();
    let config = &assembly.config;

    assert_eq!(config.mode, BuildMode::Development);
    assert_eq!(config.output.as_ref().unwrap().filename.as_str(), "bundled.js");

    let server = config.dev_server.as_ref().unwrap();
    assert_eq!(server.port, 3000);
    assert_eq!(server.host, "0.0.0.0");
    assert!(server.watch.matches(&temp_dir.path().join("app/index.html")));
    assert!(config.optimization.is_none());

    let stages = config.module_rules.css.pipeline.stages();
    let inject = config.module_rules.css.pipeline.position(&CssStage::StyleInject).unwrap();
    assert_eq!(inject, 0);
    assert_eq!(&stages[1..], CssPipeline::base().stages());

    assert!(assembly.hooks.is_empty());
}

#[tokio::test]
async fn test_production_assembly() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path(), &["index.html", "about.html"]);

    let assembly = assembler(temp_dir.path())
        .assemble(BuildMode::Production)
        .await
        .unwrap();
    let config = &assembly.config;

    assert!(config.dev_server.is_none());
    assert!(config.optimization.is_some());

    let stages = config.module_rules.css.pipeline.stages();
    assert_eq!(stages[0], CssStage::Extract);
    assert_eq!(&stages[1..stages.len() - 1], CssPipeline::base().stages());
    assert_eq!(stages.last(), Some(&CssStage::Minify));

    let js = config.module_rules.js.as_ref().unwrap();
    assert!(js.applies_to(Path::new("app/assets/scripts/App.js")));
    assert!(!js.applies_to(Path::new("node_modules/jquery/dist/jquery.js")));

    assert_eq!(config.output.as_ref().unwrap().path, temp_dir.path().join("docs"));
    assert_eq!(
        assembly.hooks.plugin_names(),
        vec!["output-cleaner", "asset-copier"]
    );
}

#[tokio::test]
async fn test_unrecognized_task_keeps_base() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path(), &["index.html", "contact.html"]);

    let mode = BuildMode::from_task("storybook");
    let assembly = assembler(temp_dir.path()).assemble(mode).await.unwrap();
    let config = &assembly.config;

    assert_eq!(config.mode, BuildMode::Unspecified);
    assert!(config.dev_server.is_none());
    assert!(config.optimization.is_none());
    assert_eq!(config.module_rules.css.pipeline, CssPipeline::base());
    assert_eq!(config.pages().count(), 2);
    assert!(config.plugins.iter().all(|p| matches!(p, PluginSpec::HtmlPage(_))));
}

#[tokio::test]
async fn test_config_file_changes_layout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pages_dir = temp_dir.path().join("src/pages");
    std::fs::create_dir_all(&pages_dir).unwrap();
    std::fs::write(pages_dir.join("home.html"), "<html></html>").unwrap();
    std::fs::write(
        temp_dir.path().join("pagepack.config.json"),
        r#"{"appDir": "src/pages", "outputDir": "public", "port": 4000}"#,
    )
    .unwrap();

    let layout = ConfigLoader::load_layout(temp_dir.path(), None, None).unwrap();
    let assembler = ConfigAssembler::new(Arc::new(TokioFileSystemService), layout);

    let dev = assembler.assemble(BuildMode::Development).await.unwrap();
    assert_eq!(dev.config.dev_server.as_ref().unwrap().port, 4000);
    assert_eq!(dev.config.pages().next().unwrap().file_name, "home.html");

    let prod = assembler.assemble(BuildMode::Production).await.unwrap();
    assert_eq!(prod.config.output.as_ref().unwrap().path, temp_dir.path().join("public"));
}
