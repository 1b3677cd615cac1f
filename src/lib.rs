pub mod aws;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod prompt;
pub mod registry;
pub mod shell;
