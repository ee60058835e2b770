#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod project;
pub mod template;
pub mod utils;
pub mod version;
