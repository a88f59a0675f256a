pub mod builder;
pub mod command;
pub mod config;
pub mod constants;
pub mod geo;
pub mod landmarks;
pub mod minimap;
pub mod viewport;
