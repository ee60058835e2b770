// Compile-time constants from Cargo.toml and build.rs
pub const VERSION: &str = env!("AGENT_OS_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

// GitHub repository hosting the setup scripts
pub const REPO_OWNER: &str = "rosstaco";
pub const REPO_NAME: &str = "agent-os";
