use crate::error::{AgentOsError, Result};
use crate::project::AGENT_OS_DIR;
use crate::utils::path::{expand_tilde, home_dir, require_home_dir};
use crate::version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the home directory and project root
pub const CONFIG_FILE_NAME: &str = ".agent-os.toml";

/// Bundles installed when no `[commands] bundles` list is configured
pub const DEFAULT_BUNDLES: &[&str] = &[
    "plan-product",
    "shape-spec",
    "write-spec",
    "create-tasks",
    "implement-tasks",
];

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub profile: ProfileConfig,
    pub commands: CommandSet,
    pub settings: SettingsConfig,
    pub bootstrap: BootstrapConfig,

    /// Verbose mode - print every copied and converted file (not stored in config file)
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    /// Directory holding `standards/`, `workflows/` and `commands/`.
    /// Defaults to `~/.agent-os/profiles/default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// The command bundles to install and the variant to take from each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    pub bundles: Vec<String>,
    pub variant: String,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            bundles: default_bundles(),
            variant: default_variant(),
        }
    }
}

impl CommandSet {
    pub fn new<S: Into<String>>(bundles: impl IntoIterator<Item = S>, variant: &str) -> Self {
        Self {
            bundles: bundles.into_iter().map(Into::into).collect(),
            variant: variant.to_string(),
        }
    }
}

fn default_bundles() -> Vec<String> {
    DEFAULT_BUNDLES.iter().map(|s| s.to_string()).collect()
}

fn default_variant() -> String {
    "single-agent".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Settings file, relative to the project root
    pub path: String,

    /// Top-level key assigned in the settings file
    pub key: String,

    /// Prompt file glob enabled under `key`
    pub pattern: String,

    pub on_parse_error: ParseErrorPolicy,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: ".vscode/settings.json".to_string(),
            key: "chat.promptFilesLocations".to_string(),
            pattern: format!("{}/commands/**/*.prompt.md", AGENT_OS_DIR),
            on_parse_error: ParseErrorPolicy::default(),
        }
    }
}

/// What to do when the existing settings file cannot be read as a JSON object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Warn and start from an empty object (previous content is lost)
    #[default]
    Replace,
    /// Abort the installation
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Raw content root the setup scripts are fetched from
    pub base_url: String,

    /// Download timeout; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/main",
        version::REPO_OWNER,
        version::REPO_NAME
    )
}

impl BootstrapConfig {
    /// URL of the base installation script
    pub fn base_script_url(&self) -> String {
        format!("{}/setup/base.sh", self.base_url.trim_end_matches('/'))
    }
}

/// One `.agent-os.toml` file. Keys left out of the file are `None` and keep
/// the value from the layer below.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub commands: CommandsSection,

    #[serde(default)]
    pub settings: SettingsSection,

    #[serde(default)]
    pub bootstrap: BootstrapSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommandsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundles: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_parse_error: Option<ParseErrorPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. Project config (.agent-os.toml in project root)
    /// 4. Global config (~/.agent-os.toml)
    /// 5. Built-in defaults
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = home_dir() {
            let global_config = home.join(CONFIG_FILE_NAME);
            if global_config.exists() {
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        let project_config = project_root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            config = config.merge(Self::from_file(&project_config)?);
        }

        config = config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration for commands that run outside a project
    pub fn load_global() -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = home_dir() {
            let global_config = home.join(CONFIG_FILE_NAME);
            if global_config.exists() {
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        config = config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Load one configuration layer from a TOML file
    pub fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = std::fs::read_to_string(path)?;
        let layer: ConfigFile = toml::from_str(&contents)?;
        Ok(layer)
    }

    /// Merge a file layer into this config (every key the file sets takes precedence)
    fn merge(mut self, other: ConfigFile) -> Self {
        if other.profile.dir.is_some() {
            self.profile.dir = other.profile.dir;
        }

        // Bundle list is replaced, not appended, so a project can narrow it
        if let Some(bundles) = other.commands.bundles {
            self.commands.bundles = bundles;
        }
        if let Some(variant) = other.commands.variant {
            self.commands.variant = variant;
        }

        if let Some(path) = other.settings.path {
            self.settings.path = path;
        }
        if let Some(key) = other.settings.key {
            self.settings.key = key;
        }
        if let Some(pattern) = other.settings.pattern {
            self.settings.pattern = pattern;
        }
        if let Some(policy) = other.settings.on_parse_error {
            self.settings.on_parse_error = policy;
        }

        if let Some(base_url) = other.bootstrap.base_url {
            self.bootstrap.base_url = base_url;
        }
        if other.bootstrap.timeout_secs.is_some() {
            self.bootstrap.timeout_secs = other.bootstrap.timeout_secs;
        }

        self
    }

    /// Apply environment variable overrides
    fn merge_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("AGENT_OS_PROFILE_DIR") {
            if !dir.is_empty() {
                self.profile.dir = Some(dir);
            }
        }

        if let Ok(url) = std::env::var("AGENT_OS_BASE_URL") {
            if !url.is_empty() {
                self.bootstrap.base_url = url;
            }
        }

        self
    }

    fn validate(&self) -> Result<()> {
        if self.commands.variant.trim().is_empty() {
            return Err(AgentOsError::InvalidConfig(
                "[commands] variant must not be empty".to_string(),
            ));
        }

        if let Some(bad) = self
            .commands
            .bundles
            .iter()
            .find(|b| b.is_empty() || b.contains('/') || b.contains('\\') || *b == "..")
        {
            return Err(AgentOsError::InvalidConfig(format!(
                "Invalid bundle name '{}': must be a single directory name",
                bad
            )));
        }

        if self.settings.key.is_empty() {
            return Err(AgentOsError::InvalidConfig(
                "[settings] key must not be empty".to_string(),
            ));
        }

        if Path::new(&self.settings.path).is_absolute() {
            return Err(AgentOsError::InvalidConfig(format!(
                "[settings] path must be relative to the project root: {}",
                self.settings.path
            )));
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn with_cli_overrides(mut self, profile_dir: Option<&Path>, verbose: bool) -> Self {
        if let Some(dir) = profile_dir {
            self.profile.dir = Some(dir.to_string_lossy().into_owned());
        }
        self.verbose = verbose;
        self
    }

    /// Resolve the profile directory, expanding `~`
    pub fn profile_dir(&self) -> Result<PathBuf> {
        match &self.profile.dir {
            Some(dir) => expand_tilde(dir).ok_or_else(|| {
                AgentOsError::InvalidConfig(format!("Cannot expand profile directory: {}", dir))
            }),
            None => Ok(require_home_dir()?
                .join(AGENT_OS_DIR)
                .join("profiles")
                .join("default")),
        }
    }
}
