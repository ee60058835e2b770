//! Conversion of Agent OS command templates into GitHub Copilot prompt files.
//!
//! Agent OS templates reference other documents with a small markup dialect.
//! Copilot understands `#file:<path>` references, so each token is rewritten
//! into one of those:
//!
//! - `{{workflows/<path>}}` -> `#file:.agent-os/workflows/<path>.md`
//! - `{{standards/<path>}}` -> `#file:.agent-os/standards/<path>.md`
//! - `@agent-os/commands/<path>.md` -> `#file:.agent-os/commands/<path>.md`
//! - `{{UNLESS ...}} ... {{ENDUNLESS ...}}` -> removed with its content
//! - `{{PHASE <n>: <content>}}` -> `<content>`
//!
//! The rules are plain pattern replacements applied in that order, one pass
//! each over the whole document. Nested or unterminated conditional blocks are
//! not supported: an `UNLESS` without a matching `ENDUNLESS` is left in place,
//! and nested blocks end at the first `ENDUNLESS`.

use crate::project::AGENT_OS_DIR;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static WORKFLOW_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{workflows/([^}]+)\}\}").unwrap());

static STANDARDS_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{standards/([^}]+)\}\}").unwrap());

static COMMAND_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@agent-os/commands/([^}\s]+\.md)").unwrap());

// Lazy `*?` keeps two blocks in one document from collapsing into a single span
static UNLESS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{UNLESS[^}]*\}\}[\s\S]*?\{\{ENDUNLESS[^}]*\}\}").unwrap()
});

static PHASE_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{PHASE \d+: ([^}]+)\}\}").unwrap());

/// Rewrites template markup into `#file:` references rooted at a directory
#[derive(Debug, Clone)]
pub struct TemplateConverter {
    root: String,
}

impl Default for TemplateConverter {
    fn default() -> Self {
        Self::new(AGENT_OS_DIR)
    }
}

impl TemplateConverter {
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Convert a template document. Never fails; output is trimmed.
    pub fn convert(&self, content: &str) -> String {
        let converted = WORKFLOW_REF.replace_all(content, |caps: &Captures| {
            format!("#file:{}/workflows/{}.md", self.root, &caps[1])
        });

        let converted = STANDARDS_REF.replace_all(&converted, |caps: &Captures| {
            format!("#file:{}/standards/{}.md", self.root, &caps[1])
        });

        let converted = COMMAND_REF.replace_all(&converted, |caps: &Captures| {
            format!("#file:{}/commands/{}", self.root, &caps[1])
        });

        let converted = UNLESS_BLOCK.replace_all(&converted, "");

        let converted =
            PHASE_WRAPPER.replace_all(&converted, |caps: &Captures| caps[1].to_string());

        converted.trim().to_string()
    }
}

/// Convert a template with the default `.agent-os` root
pub fn convert(content: &str) -> String {
    TemplateConverter::default().convert(content)
}
