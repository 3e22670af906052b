// Infrastructure layer
pub mod file_system;

pub use file_system::*;
