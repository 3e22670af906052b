use pagepack::core::models::*;
use pagepack::core::services::ConfigAssembler;
use pagepack::infrastructure::TokioFileSystemService;
use pagepack::utils::PagepackError;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn seed_site(root: &Path) {
    let app = root.join("app");
    fs::create_dir_all(app.join("assets/scripts")).unwrap();
    fs::create_dir_all(app.join("assets/images/gallery")).unwrap();
    fs::write(app.join("index.html"), "<html></html>").unwrap();
    fs::write(app.join("assets/scripts/App.js"), "console.log('hi');").unwrap();
    fs::write(app.join("assets/images/logo.png"), [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a]).unwrap();
    fs::write(app.join("assets/images/gallery/beach.jpg"), vec![7u8; 4096]).unwrap();
}

async fn production(root: &Path) -> pagepack::core::services::Assembly {
    ConfigAssembler::new(Arc::new(TokioFileSystemService), ProjectLayout::for_root(root))
        .assemble(BuildMode::Production)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_full_production_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path());

    let dist = temp_dir.path().join("docs");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("main.0123456789abcdef0123.js"), "stale").unwrap();

    let assembly = production(temp_dir.path()).await;

    assembly.run_pre_build().unwrap();
    assert!(!dist.exists(), "pre-build hook should remove the old output");

    // Stand-in for the bundler writing its artifacts
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), "<html></html>").unwrap();

    assembly.run_post_build(&BuildOutcome::succeeded()).unwrap();

    let images = temp_dir.path().join("app/assets/images");
    let copied = dist.join("assets/images");
    for file in ["logo.png", "gallery/beach.jpg"] {
        assert_eq!(
            fs::read(copied.join(file)).unwrap(),
            fs::read(images.join(file)).unwrap(),
            "{} should be byte-identical",
            file
        );
    }
    assert!(dist.join("index.html").exists());
}

#[tokio::test]
async fn test_failed_build_skips_copy() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path());

    let assembly = production(temp_dir.path()).await;
    assembly
        .run_post_build(&BuildOutcome::failed(vec!["Module not found".to_string()]))
        .unwrap();

    assert!(!temp_dir.path().join("docs/assets/images").exists());
}

#[tokio::test]
async fn test_missing_images_is_copy_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path());
    fs::remove_dir_all(temp_dir.path().join("app/assets/images")).unwrap();

    let assembly = production(temp_dir.path()).await;
    let result = assembly.run_post_build(&BuildOutcome::succeeded());

    assert!(matches!(result, Err(PagepackError::Copy { .. })));
}

#[tokio::test]
async fn test_development_has_no_side_effects() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path());
    let dist = temp_dir.path().join("docs");
    fs::create_dir_all(&dist).unwrap();

    let assembly = ConfigAssembler::new(
        Arc::new(TokioFileSystemService),
        ProjectLayout::for_root(temp_dir.path()),
    )
    .assemble(BuildMode::Development)
    .await
    .unwrap();

    assembly.run_pre_build().unwrap();
    assembly.run_post_build(&BuildOutcome::succeeded()).unwrap();

    assert!(dist.exists());
    assert!(!dist.join("assets/images").exists());
}

#[tokio::test]
async fn test_output_at_project_root_is_never_cleaned() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_site(temp_dir.path());

    let layout = ProjectLayout {
        dist_dir: ".".into(),
        ..ProjectLayout::for_root(temp_dir.path())
    };
    let assembly = ConfigAssembler::new(Arc::new(TokioFileSystemService), layout)
        .assemble(BuildMode::Production)
        .await
        .unwrap();

    let result = assembly.run_pre_build();

    assert!(matches!(result, Err(PagepackError::Clean { .. })));
    assert!(temp_dir.path().join("app/index.html").exists());
    assert!(temp_dir.path().join("app/assets/images/logo.png").exists());
}
