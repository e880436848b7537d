pub mod args;
pub mod artifact;
pub mod config;
