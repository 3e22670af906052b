// pagepack - front-end asset pipeline configuration

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod plugins;
pub mod utils;
