// Core domain layer
pub mod models;
pub mod services;
pub mod interfaces;
pub mod plugin;

pub use models::*;
pub use services::*;
pub use interfaces::*;
pub use plugin::*;
