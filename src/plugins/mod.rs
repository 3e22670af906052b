// Built-in lifecycle plugins

pub mod asset_copier;
pub mod output_cleaner;

pub use asset_copier::{copy_tree, AssetCopier, CopyStats};
pub use output_cleaner::OutputCleaner;
