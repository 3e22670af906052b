// Asset Copier: mirrors the image directory into the distribution directory

use crate::core::models::BuildOutcome;
use crate::core::plugin::{Plugin, PluginContext};
use crate::utils::{resolve_path, Logger, PagepackError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// Post-build hook copying a directory tree once the bundler succeeds
///
/// Fires at most once per assembly. Copy failures are fatal and nothing
/// already written is rolled back.
pub struct AssetCopier {
    from: PathBuf,
    to: PathBuf,
    fired: AtomicBool,
}

impl AssetCopier {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            fired: AtomicBool::new(false),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Plugin for AssetCopier {
    fn name(&self) -> &str {
        "asset-copier"
    }

    fn on_build_end(&self, _context: &PluginContext, outcome: &BuildOutcome) -> Result<()> {
        if !outcome.success {
            Logger::warn(&format!(
                "Build reported {} error(s), skipping asset copy",
                outcome.errors.len()
            ));
            return Ok(());
        }

        if self.fired.swap(true, Ordering::SeqCst) {
            Logger::debug("Asset copy already done for this build");
            return Ok(());
        }

        let stats = copy_tree(&self.from, &self.to)?;
        Logger::info(&format!(
            "🖼️  Copied {} file(s) from {} to {} ({} unchanged)",
            stats.copied,
            self.from.display(),
            self.to.display(),
            stats.unchanged
        ));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files written to the destination
    pub copied: usize,
    /// Files already present with identical content
    pub unchanged: usize,
}

/// Copy every file under `from` into `to`, overwriting files whose content
/// differs. `to` must not be `from` or lie inside it.
pub fn copy_tree(from: &Path, to: &Path) -> Result<CopyStats> {
    let source = fs::canonicalize(from).map_err(|e| PagepackError::copy(from, to, e))?;
    let destination = resolve_path(to).map_err(|e| PagepackError::copy(from, to, e))?;

    if source == destination {
        return Err(PagepackError::copy(
            from,
            to,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "source and destination must not be the same",
            ),
        ));
    }
    if destination.starts_with(&source) {
        return Err(PagepackError::copy(
            from,
            to,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot copy a directory into a subdirectory of itself",
            ),
        ));
    }

    let mut stats = CopyStats::default();

    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| {
            let source = e.into_io_error().unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::Other, "filesystem loop detected")
            });
            PagepackError::copy(from, to, source)
        })?;

        let relative = match entry.path().strip_prefix(from) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| PagepackError::copy(entry.path(), &target, e))?;
            continue;
        }

        if same_content(entry.path(), &target) {
            stats.unchanged += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| PagepackError::copy(entry.path(), parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| PagepackError::copy(entry.path(), &target, e))?;
        stats.copied += 1;
    }

    Ok(stats)
}

/// Equal length and equal BLAKE3 digest; any read failure counts as different
fn same_content(source: &Path, target: &Path) -> bool {
    let (Ok(source_meta), Ok(target_meta)) = (fs::metadata(source), fs::metadata(target)) else {
        return false;
    };
    if !target_meta.is_file() || source_meta.len() != target_meta.len() {
        return false;
    }

    match (fs::read(source), fs::read(target)) {
        (Ok(a), Ok(b)) => blake3::hash(&a) == blake3::hash(&b),
        _ => false,
    }
}
