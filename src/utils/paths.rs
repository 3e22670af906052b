use std::io;
use std::path::{Path, PathBuf};

/// Canonical form of `path`, which need not exist yet.
///
/// The deepest existing ancestor is canonicalized and the missing tail is
/// appended unchanged, so two spellings of the same location compare equal.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    for ancestor in absolute.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize() {
            let tail = absolute.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return Ok(if tail.as_os_str().is_empty() {
                canonical
            } else {
                canonical.join(tail)
            });
        }
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing ancestor for {}", path.display()),
    ))
}
