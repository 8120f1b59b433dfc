pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod render;
pub mod series;
pub mod service;
pub mod source;
pub mod telemetry;
pub mod validate;
