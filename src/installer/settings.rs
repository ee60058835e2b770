//! VS Code settings update.
//!
//! The configured key is assigned at the top level of the settings object;
//! other keys keep their values and order. Nested objects are not merged: an
//! existing value under the key is replaced.

use crate::config::{ParseErrorPolicy, SettingsConfig};
use crate::error::{AgentOsError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// What happened to the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
    /// No settings file existed
    Created,
    /// Existing settings were kept and the key assigned
    Merged,
    /// Existing content could not be parsed and was discarded
    Replaced,
}

/// Assign the prompt file location key in the settings file at `path`.
///
/// A settings file that cannot be read or is not a JSON object is replaced by
/// a new one with a warning, unless `on_parse_error = "fail"` is configured.
pub fn merge_settings(path: &Path, config: &SettingsConfig) -> Result<SettingsOutcome> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let (mut settings, outcome) = if path.exists() {
        let parsed = fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| parse_object(&bytes));
        match parsed {
            Ok(map) => (map, SettingsOutcome::Merged),
            Err(reason) => match config.on_parse_error {
                ParseErrorPolicy::Replace => {
                    eprintln!(
                        "⚠️  Warning: Could not parse existing {}, creating new one ({})",
                        path.display(),
                        reason
                    );
                    (Map::new(), SettingsOutcome::Replaced)
                }
                ParseErrorPolicy::Fail => {
                    return Err(AgentOsError::SettingsParse {
                        path: path.to_path_buf(),
                        reason,
                    });
                }
            },
        }
    } else {
        (Map::new(), SettingsOutcome::Created)
    };

    let mut locations = Map::new();
    locations.insert(config.pattern.clone(), Value::Bool(true));
    settings.insert(config.key.clone(), Value::Object(locations));

    let serialized = serde_json::to_string_pretty(&Value::Object(settings))?;
    fs::write(path, serialized)?;

    Ok(outcome)
}

fn parse_object(content: &[u8]) -> std::result::Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("top-level value is not an object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".vscode/settings.json");

        let outcome = merge_settings(&path, &SettingsConfig::default()).unwrap();
        assert_eq!(outcome, SettingsOutcome::Created);

        let expected = serde_json::json!({
            "chat.promptFilesLocations": {
                ".agent-os/commands/**/*.prompt.md": true
            }
        });
        assert_eq!(read_json(&path), expected);
    }

    #[test]
    fn test_two_space_indentation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        merge_settings(&path, &SettingsConfig::default()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n  \"chat.promptFilesLocations\": {\n    \".agent-os/commands/**/*.prompt.md\": true\n  }\n}"
        );
    }

    #[test]
    fn test_preserves_unrelated_keys_and_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"editor.tabSize": 4, "files.exclude": {"**/.git": true}, "a.last": "x"}"#,
        )
        .unwrap();

        let outcome = merge_settings(&path, &SettingsConfig::default()).unwrap();
        assert_eq!(outcome, SettingsOutcome::Merged);

        let json = read_json(&path);
        assert_eq!(json["editor.tabSize"], 4);
        assert_eq!(json["files.exclude"]["**/.git"], true);
        assert_eq!(json["a.last"], "x");
        assert_eq!(
            json["chat.promptFilesLocations"][".agent-os/commands/**/*.prompt.md"],
            true
        );

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec![
                "editor.tabSize",
                "files.exclude",
                "a.last",
                "chat.promptFilesLocations"
            ]
        );
    }

    #[test]
    fn test_existing_key_replaced_not_deep_merged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"chat.promptFilesLocations": {"other/**/*.prompt.md": true}}"#,
        )
        .unwrap();

        merge_settings(&path, &SettingsConfig::default()).unwrap();

        let locations = read_json(&path)["chat.promptFilesLocations"].clone();
        assert_eq!(
            locations,
            serde_json::json!({".agent-os/commands/**/*.prompt.md": true})
        );
    }

    #[test]
    fn test_unparsable_file_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ // comments are not JSON\n \"a\": 1 }").unwrap();

        let outcome = merge_settings(&path, &SettingsConfig::default()).unwrap();
        assert_eq!(outcome, SettingsOutcome::Replaced);

        let json = read_json(&path);
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert!(json.get("a").is_none());
    }

    #[test]
    fn test_non_object_treated_as_unparsable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let outcome = merge_settings(&path, &SettingsConfig::default()).unwrap();
        assert_eq!(outcome, SettingsOutcome::Replaced);
        assert!(read_json(&path).is_object());
    }

    #[test]
    fn test_invalid_utf8_file_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, b"{\"a\": \"\xff\xfe\"}").unwrap();

        let outcome = merge_settings(&path, &SettingsConfig::default()).unwrap();
        assert_eq!(outcome, SettingsOutcome::Replaced);

        let json = read_json(&path);
        assert!(json.get("a").is_none());
        assert!(json.get("chat.promptFilesLocations").is_some());
    }

    #[test]
    fn test_invalid_utf8_file_with_fail_policy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, b"{\"a\": \"\xff\"}").unwrap();

        let config = SettingsConfig {
            on_parse_error: ParseErrorPolicy::Fail,
            ..SettingsConfig::default()
        };
        assert!(matches!(
            merge_settings(&path, &config),
            Err(AgentOsError::SettingsParse { .. })
        ));
        assert_eq!(fs::read(&path).unwrap(), b"{\"a\": \"\xff\"}");
    }

    #[test]
    fn test_fail_policy_keeps_original() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let config = SettingsConfig {
            on_parse_error: ParseErrorPolicy::Fail,
            ..SettingsConfig::default()
        };
        let result = merge_settings(&path, &config);

        assert!(matches!(result, Err(AgentOsError::SettingsParse { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_custom_key_and_pattern() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        let config = SettingsConfig {
            key: "chat.instructionsFilesLocations".to_string(),
            pattern: ".agent-os/standards/**/*.md".to_string(),
            ..SettingsConfig::default()
        };
        merge_settings(&path, &config).unwrap();

        assert_eq!(
            read_json(&path)["chat.instructionsFilesLocations"][".agent-os/standards/**/*.md"],
            true
        );
    }
}
