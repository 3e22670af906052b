use crate::core::interfaces::FileSystemService;
use crate::utils::{PagepackError, Result};
use std::path::Path;
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await
            .map_err(PagepackError::Io)?;

        while let Some(entry) = entries.next_entry().await
            .map_err(PagepackError::Io)? {

            // Follows symlinks, unlike DirEntry::file_type
            let is_file = fs::metadata(entry.path()).await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    async fn file_exists(&self, path: &Path) -> bool {
        fs::metadata(path).await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
