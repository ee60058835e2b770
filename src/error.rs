use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentOsError {
    #[error("Failed to download: {0}")]
    DownloadFailed(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Script exited with code {0}")]
    ScriptExitCode(i32),

    #[error("Script was terminated by a signal")]
    ScriptTerminated,

    #[error("Failed to execute script: {0}")]
    ScriptSpawn(String),

    #[error("bash not found in PATH. Agent OS setup scripts require bash.")]
    ShellNotFound,

    #[error("Script file not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Could not parse {path}: {reason}")]
    SettingsParse { path: PathBuf, reason: String },

    #[error("Could not determine home directory (HOME is not set)")]
    HomeNotFound,

    #[error("Only GitHub Copilot is currently supported.")]
    UnsupportedTarget,

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl From<reqwest::Error> for AgentOsError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AgentOsError::DownloadFailed(status.as_u16()),
            None => AgentOsError::Network(err.to_string()),
        }
    }
}

impl AgentOsError {
    /// True for the error kinds that mean the download step failed
    pub fn is_download_failure(&self) -> bool {
        matches!(
            self,
            AgentOsError::DownloadFailed(_) | AgentOsError::Network(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AgentOsError>;
