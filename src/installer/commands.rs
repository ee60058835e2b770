//! Conversion of command bundles into Copilot prompt files.

use crate::config::CommandSet;
use crate::error::Result;
use crate::template::TemplateConverter;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static NUMBERED_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+-").unwrap());

/// How a command file is named on output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFileKind {
    /// Orchestrator file, installed as `<name>.prompt.md`
    Main,
    /// Sub-step file such as `1-gather-info.md`, installed under its own name
    Numbered,
}

impl CommandFileKind {
    pub fn classify(file_name: &str) -> Self {
        if NUMBERED_FILE.is_match(file_name) {
            CommandFileKind::Numbered
        } else {
            CommandFileKind::Main
        }
    }
}

/// Output name for a command file
pub fn output_file_name(file_name: &str) -> String {
    match CommandFileKind::classify(file_name) {
        CommandFileKind::Numbered => file_name.to_string(),
        CommandFileKind::Main => match file_name.strip_suffix(".md") {
            Some(stem) => format!("{}.prompt.md", stem),
            None => file_name.to_string(),
        },
    }
}

/// Files written for one bundle
#[derive(Debug, Clone, Default)]
pub struct BundleReport {
    pub bundle: String,
    pub files: Vec<PathBuf>,
}

impl BundleReport {
    /// Main prompt files written for this bundle
    pub fn prompts(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".prompt.md"))
        })
    }
}

/// Convert every bundle of `command_set` from `source_dir` into `dest_dir`.
///
/// For each bundle, `<source_dir>/<bundle>/<variant>` is read; bundles without
/// that directory are skipped. Each `.md` file directly inside it is converted
/// and written to `<dest_dir>/<bundle>/`, overwriting existing files.
///
/// # Errors
/// The first read or write failure aborts the whole run. Files already written
/// are left in place.
pub fn install_commands(
    source_dir: &Path,
    dest_dir: &Path,
    command_set: &CommandSet,
    converter: &TemplateConverter,
) -> Result<Vec<BundleReport>> {
    let mut reports = Vec::new();

    for bundle in &command_set.bundles {
        let variant_dir = source_dir.join(bundle).join(&command_set.variant);
        if !variant_dir.is_dir() {
            continue;
        }

        let bundle_dest = dest_dir.join(bundle);
        fs::create_dir_all(&bundle_dest)?;

        let mut report = BundleReport {
            bundle: bundle.clone(),
            files: Vec::new(),
        };

        for (file_name, source_path) in markdown_files(&variant_dir)? {
            let content = fs::read_to_string(&source_path)?;
            let converted = converter.convert(&content);

            let dest_path = bundle_dest.join(output_file_name(&file_name));
            fs::write(&dest_path, converted)?;
            report.files.push(dest_path);
        }

        reports.push(report);
    }

    Ok(reports)
}

/// `.md` files directly inside `dir`, sorted by name
fn markdown_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(".md") {
            files.push((name, path));
        }
    }

    files.sort();
    Ok(files)
}
