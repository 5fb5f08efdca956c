pub mod clip;
pub mod config;
pub mod manifest;
pub mod output;
