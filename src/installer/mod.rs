//! Installation of Agent OS into a project for GitHub Copilot.

pub mod commands;
pub mod settings;

use crate::config::Config;
use crate::error::{AgentOsError, Result};
use crate::project::{Project, AGENT_OS_DIR};
use crate::template::TemplateConverter;
use crate::utils::fs::copy_tree;
use commands::BundleReport;
use settings::SettingsOutcome;
use std::fs;
use std::path::Path;

/// Summary of a completed installation
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub standards_copied: usize,
    pub workflows_copied: usize,
    pub bundles: Vec<BundleReport>,
    pub settings: SettingsOutcome,
}

/// Install standards, workflows, converted commands and VS Code settings.
///
/// Steps run in order and the first failure aborts the installation; files
/// written by earlier steps are left in place.
pub fn install_for_copilot(project: &Project, config: &Config) -> Result<InstallReport> {
    let profile_dir = config.profile_dir()?;
    if !profile_dir.is_dir() {
        return Err(AgentOsError::SourceNotFound(profile_dir));
    }

    println!("📦 Installing Agent OS for GitHub Copilot...\n");
    if config.verbose {
        println!("Profile: {}", profile_dir.display());
        println!("Project: {}\n", project.root().display());
    }

    println!("Creating {} directory structure...", AGENT_OS_DIR);
    fs::create_dir_all(project.commands_dir())?;
    fs::create_dir_all(project.workflows_dir())?;
    fs::create_dir_all(project.standards_dir())?;

    println!("Copying standards...");
    let standards_copied = copy_tree(&profile_dir.join("standards"), &project.standards_dir())?;
    if config.verbose {
        println!("  {} file(s) copied", standards_copied);
    }

    println!("Copying workflows...");
    let workflows_copied = copy_tree(&profile_dir.join("workflows"), &project.workflows_dir())?;
    if config.verbose {
        println!("  {} file(s) copied", workflows_copied);
    }

    println!("Converting command files to .prompt.md format...");
    let converter = TemplateConverter::new(AGENT_OS_DIR);
    let bundles = commands::install_commands(
        &profile_dir.join("commands"),
        &project.commands_dir(),
        &config.commands,
        &converter,
    )?;
    if config.verbose {
        print_bundle_details(project.root(), &bundles);
    }

    println!("Configuring VS Code settings...");
    let settings_path = project.settings_path(&config.settings.path);
    let settings = settings::merge_settings(&settings_path, &config.settings)?;
    if config.verbose {
        let verb = match settings {
            SettingsOutcome::Created => "Created",
            SettingsOutcome::Merged => "Updated",
            SettingsOutcome::Replaced => "Replaced",
        };
        println!("  {} {}", verb, settings_path.display());
    }

    let report = InstallReport {
        standards_copied,
        workflows_copied,
        bundles,
        settings,
    };

    print_success(config, &report);

    Ok(report)
}

fn print_bundle_details(project_root: &Path, bundles: &[BundleReport]) {
    for report in bundles {
        for file in &report.files {
            let shown = file.strip_prefix(project_root).unwrap_or(file);
            println!("  ✓ {}", shown.display());
        }
    }
}

fn print_success(config: &Config, report: &InstallReport) {
    println!("\n✅ Agent OS installed successfully!\n");

    if report.bundles.is_empty() {
        println!("⚠️  No command bundles found for variant '{}'", config.commands.variant);
        return;
    }

    let lines = prompt_lines(report);
    if lines.is_empty() {
        println!("⚠️  No main prompt files were written");
        return;
    }

    println!("📝 Available prompts:");
    for line in &lines {
        println!("  - {}", line);
    }
    println!();
    println!("💡 Use these prompts in GitHub Copilot Chat by referencing:");
    println!(
        "   #file:{}/commands/[command-name].prompt.md\n",
        AGENT_OS_DIR
    );
}

/// One entry per `.prompt.md` actually written, described by its bundle
fn prompt_lines(report: &InstallReport) -> Vec<String> {
    let mut lines = Vec::new();
    for bundle in &report.bundles {
        for prompt in bundle.prompts() {
            let name = prompt
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match describe_bundle(&bundle.bundle) {
                Some(description) => lines.push(format!("{} - {}", name, description)),
                None => lines.push(name),
            }
        }
    }
    lines
}

/// One-line description of the standard bundles
pub fn describe_bundle(bundle: &str) -> Option<&'static str> {
    match bundle {
        "plan-product" => Some("Plan and document product mission and roadmap"),
        "shape-spec" => Some("Shape feature specifications"),
        "write-spec" => Some("Write detailed specifications"),
        "create-tasks" => Some("Create implementation tasks"),
        "implement-tasks" => Some("Execute implementation tasks"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandSet;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn make_profile(root: &Path) {
        write(&root.join("standards/global/coding-style.md"), "# Coding style");
        write(&root.join("workflows/planning/gather.md"), "{{standards/global/*}}");
        write(
            &root.join("commands/plan-product/single-agent/plan-product.md"),
            "{{PHASE 1: @agent-os/commands/plan-product/1-concept.md}}",
        );
        write(
            &root.join("commands/plan-product/single-agent/1-concept.md"),
            "{{workflows/planning/gather}}",
        );
    }

    fn config_for(profile: &Path) -> Config {
        let mut config = Config::default();
        config.profile.dir = Some(profile.to_string_lossy().into_owned());
        config
    }

    #[test]
    fn test_full_install() {
        let tmp = TempDir::new().unwrap();
        let profile = tmp.path().join("profile");
        make_profile(&profile);
        let project = Project::new(tmp.path().join("project"));

        let report = install_for_copilot(&project, &config_for(&profile)).unwrap();

        assert_eq!(report.standards_copied, 1);
        assert_eq!(report.workflows_copied, 1);
        assert_eq!(report.bundles.len(), 1);
        assert_eq!(report.settings, SettingsOutcome::Created);

        let agent_os = project.agent_os_dir();
        assert_eq!(
            fs::read_to_string(agent_os.join("workflows/planning/gather.md")).unwrap(),
            "{{standards/global/*}}"
        );
        assert_eq!(
            fs::read_to_string(agent_os.join("commands/plan-product/plan-product.prompt.md"))
                .unwrap(),
            "#file:.agent-os/commands/plan-product/1-concept.md"
        );
        assert_eq!(
            fs::read_to_string(agent_os.join("commands/plan-product/1-concept.md")).unwrap(),
            "#file:.agent-os/workflows/planning/gather.md"
        );
        assert!(project.root().join(".vscode/settings.json").is_file());
    }

    #[test]
    fn test_install_twice_is_stable() {
        let tmp = TempDir::new().unwrap();
        let profile = tmp.path().join("profile");
        make_profile(&profile);
        let project = Project::new(tmp.path().join("project"));
        let config = config_for(&profile);

        install_for_copilot(&project, &config).unwrap();
        let first =
            fs::read_to_string(project.root().join(".vscode/settings.json")).unwrap();

        let report = install_for_copilot(&project, &config).unwrap();
        let second =
            fs::read_to_string(project.root().join(".vscode/settings.json")).unwrap();

        assert_eq!(report.settings, SettingsOutcome::Merged);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_profile_dir() {
        let tmp = TempDir::new().unwrap();
        let project = Project::new(tmp.path().join("project"));

        let result = install_for_copilot(&project, &config_for(&tmp.path().join("nope")));
        assert!(matches!(result, Err(AgentOsError::SourceNotFound(_))));
        assert!(!project.agent_os_dir().exists());
    }

    #[test]
    fn test_missing_workflows_aborts_after_standards() {
        let tmp = TempDir::new().unwrap();
        let profile = tmp.path().join("profile");
        write(&profile.join("standards/a.md"), "a");
        let project = Project::new(tmp.path().join("project"));

        let result = install_for_copilot(&project, &config_for(&profile));

        assert!(matches!(result, Err(AgentOsError::SourceNotFound(_))));
        // No rollback: standards already copied stay on disk
        assert!(project.standards_dir().join("a.md").is_file());
        assert!(!project.root().join(".vscode/settings.json").exists());
    }

    #[test]
    fn test_reduced_bundle_set() {
        let tmp = TempDir::new().unwrap();
        let profile = tmp.path().join("profile");
        make_profile(&profile);
        write(
            &profile.join("commands/write-spec/single-agent/write-spec.md"),
            "spec",
        );
        let project = Project::new(tmp.path().join("project"));

        let mut config = config_for(&profile);
        config.commands = CommandSet::new(["write-spec"], "single-agent");

        let report = install_for_copilot(&project, &config).unwrap();
        assert_eq!(report.bundles.len(), 1);
        assert_eq!(report.bundles[0].bundle, "write-spec");
        assert!(!project.commands_dir().join("plan-product").exists());
    }

    #[test]
    fn test_prompt_list_skips_bundle_without_main_file() {
        let tmp = TempDir::new().unwrap();
        let profile = tmp.path().join("profile");
        make_profile(&profile);
        write(
            &profile.join("commands/create-tasks/single-agent/1-create-tasks-list.md"),
            "steps",
        );
        let project = Project::new(tmp.path().join("project"));

        let mut config = config_for(&profile);
        config.commands = CommandSet::new(["plan-product", "create-tasks"], "single-agent");

        let report = install_for_copilot(&project, &config).unwrap();
        assert_eq!(report.bundles.len(), 2);
        assert_eq!(
            prompt_lines(&report),
            vec!["plan-product.prompt.md - Plan and document product mission and roadmap"]
        );
        assert!(!project
            .commands_dir()
            .join("create-tasks/create-tasks.prompt.md")
            .exists());
    }

    #[test]
    fn test_describe_bundle() {
        assert_eq!(
            describe_bundle("shape-spec"),
            Some("Shape feature specifications")
        );
        assert_eq!(describe_bundle("custom"), None);
    }
}
