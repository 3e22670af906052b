use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// File system operations needed for page discovery
#[async_trait]
pub trait FileSystemService: Send + Sync {
    /// Names of the regular files directly inside `dir`, in listing order
    async fn list_files(&self, dir: &Path) -> Result<Vec<String>>;
    async fn file_exists(&self, path: &Path) -> bool;
}
