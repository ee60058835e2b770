use crate::error::{AgentOsError, Result};
use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

/// Current user's home directory, taken from `HOME`
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Like [`home_dir`], but an error when `HOME` is not set
pub fn require_home_dir() -> Result<PathBuf> {
    home_dir().ok_or(AgentOsError::HomeNotFound)
}

/// Expand tilde (~) in paths to actual home directories.
///
/// Supports:
/// - `~` or `~/path` - expands to current user's home directory
/// - `~username/path` - expands to the specified user's home directory
///
/// # Examples
///
/// ```
/// use agent_os::utils::path::expand_tilde;
///
/// let path = expand_tilde("~/.agent-os/profiles/default").unwrap();
/// assert!(path.ends_with(".agent-os/profiles/default"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    let Some(after_tilde) = path_str.strip_prefix('~') else {
        return Some(path.to_path_buf());
    };

    if after_tilde.is_empty() || after_tilde.starts_with('/') {
        return Some(home_dir()?.join(after_tilde.trim_start_matches('/')));
    }

    // ~username/... or ~username
    let username_end = after_tilde.find('/').unwrap_or(after_tilde.len());
    let username = &after_tilde[..username_end];
    let rest = after_tilde[username_end..].trim_start_matches('/');

    let user = uzers::get_user_by_name(username)?;
    Some(user.home_dir().join(rest))
}

/// Render a path under the home directory as `~/...` for messages
pub fn display_with_tilde(path: &Path) -> String {
    match home_dir() {
        Some(home) => match path.strip_prefix(&home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        },
        None => path.display().to_string(),
    }
}
