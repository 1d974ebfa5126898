//! host 설정/자체 설정 파일 쓰기.
//!
//! 모든 함수는 `ConfigMergeResult`를 반환하며 실패를 경계 밖으로 전파하지 않는다.
//! 쓰기는 항상 파일 전체 덮어쓰기이며, 내용이 같으면 쓰지 않는다.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::errors::io_error;
use super::format::{ConfigFormat, detect_config_format};
use super::jsonc::{find_top_level_value, indent_continuation, insert_after_opening_brace, replace_range};
use super::parser::parse_config_file;
use crate::domain::diagnostic::{ConfigError, ConfigErrorKind, ConfigMergeResult};
use crate::domain::host::HostConfigDocument;
use crate::domain::merge::deep_merge;

/// 설정 디렉터리를 먼저 만든다.
pub fn ensure_config_dir(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|err| io_error(dir, &err))
}

fn write_whole(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_config_dir(parent)?;
    }
    fs::write(path, content).map_err(|err| io_error(path, &err))?;
    info!(path = %path.display(), bytes = content.len(), "wrote config file");
    Ok(())
}

fn render_pretty(path: &Path, value: &Value) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(value)
        .map(|rendered| format!("{rendered}\n"))
        .map_err(|err| ConfigError::new(path, ConfigErrorKind::Unknown(err.to_string())))
}

fn render_inline_array(items: &[String]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|item| Value::String(item.clone()).to_string())
        .collect();
    format!("[{}]", parts.join(", "))
}

fn finish(path: &Path, outcome: Result<bool, ConfigError>) -> ConfigMergeResult {
    match outcome {
        Ok(true) => ConfigMergeResult::written(path),
        Ok(false) => {
            debug!(path = %path.display(), "config already up to date");
            ConfigMergeResult::unchanged(path)
        }
        Err(err) => {
            warn!(error = %err, "config write failed");
            ConfigMergeResult::failed(err)
        }
    }
}

/// 단일 plugin 항목을 보장한다.
pub fn ensure_plugin(config_dir: &Path, entry: &str) -> ConfigMergeResult {
    ensure_plugins(config_dir, &[entry.to_string()])
}

/// host 설정의 `plugin` 목록에 항목들이 정확히 한 번씩 존재하도록 한다.
pub fn ensure_plugins(config_dir: &Path, entries: &[String]) -> ConfigMergeResult {
    let detected = detect_config_format(config_dir);
    let path = detected.path.clone();
    let outcome = ensure_config_dir(config_dir).and_then(|_| match detected.format {
        ConfigFormat::None => create_with_plugins(&path, entries),
        ConfigFormat::Plain => ensure_plugins_plain(&path, entries),
        ConfigFormat::Commented => ensure_plugins_commented(&path, entries),
    });
    finish(&path, outcome)
}

fn create_with_plugins(path: &Path, entries: &[String]) -> Result<bool, ConfigError> {
    let mut doc = HostConfigDocument::default();
    doc.ensure_plugins(entries);
    write_whole(path, &render_pretty(path, &doc.into_value())?)?;
    Ok(true)
}

fn load_host_document(path: &Path, commented: bool) -> Result<(String, HostConfigDocument), ConfigError> {
    let parsed = parse_config_file(path, commented)?;
    // parse_config_file이 최상위 객체를 보장한다.
    let doc = HostConfigDocument::from_value(parsed.value).ok_or_else(|| {
        ConfigError::new(path, ConfigErrorKind::WrongShape("a non-object value".to_string()))
    })?;
    Ok((parsed.raw, doc))
}

fn ensure_plugins_plain(path: &Path, entries: &[String]) -> Result<bool, ConfigError> {
    let (_, mut doc) = load_host_document(path, false)?;
    if !doc.ensure_plugins(entries) {
        return Ok(false);
    }
    write_whole(path, &render_pretty(path, &doc.into_value())?)?;
    Ok(true)
}

/// 주석 형식: `plugin` 값 구간만 교체하고 나머지 원문(주석 포함)은 건드리지 않는다.
fn ensure_plugins_commented(path: &Path, entries: &[String]) -> Result<bool, ConfigError> {
    let (raw, mut doc) = load_host_document(path, true)?;
    if !doc.ensure_plugins(entries) {
        return Ok(false);
    }
    let replacement = render_inline_array(&doc.plugins());

    let patched = match find_top_level_value(&raw, "plugin") {
        Some(range) => replace_range(&raw, range, &replacement),
        None => {
            debug!(path = %path.display(), "plugin key not found, inserting after opening brace");
            insert_after_opening_brace(&raw, "plugin", &replacement).ok_or_else(|| {
                ConfigError::new(
                    path,
                    ConfigErrorKind::Unknown("could not locate the top-level object".to_string()),
                )
            })?
        }
    };
    write_whole(path, &patched)?;
    Ok(true)
}

/// host 설정의 `provider` 아래에 블록을 deep merge한다.
pub fn merge_provider_blocks(config_dir: &Path, blocks: &Value) -> ConfigMergeResult {
    let detected = detect_config_format(config_dir);
    let path = detected.path.clone();
    let outcome = ensure_config_dir(config_dir).and_then(|_| {
        let commented = detected.format == ConfigFormat::Commented;
        let (raw, mut doc) = match detected.format {
            ConfigFormat::None => (String::from("{}\n"), HostConfigDocument::default()),
            _ => load_host_document(&path, commented)?,
        };
        if !doc.merge_provider_blocks(blocks) {
            return Ok(false);
        }

        let value = doc.into_value();
        if !commented {
            write_whole(&path, &render_pretty(&path, &value)?)?;
            return Ok(true);
        }

        let provider = value.get("provider").cloned().unwrap_or(Value::Object(Map::new()));
        let rendered = serde_json::to_string_pretty(&provider)
            .map_err(|err| ConfigError::new(&path, ConfigErrorKind::Unknown(err.to_string())))?;
        let rendered = indent_continuation(&rendered, "  ");
        let patched = match find_top_level_value(&raw, "provider") {
            Some(range) => replace_range(&raw, range, &rendered),
            None => insert_after_opening_brace(&raw, "provider", &rendered).ok_or_else(|| {
                ConfigError::new(
                    &path,
                    ConfigErrorKind::Unknown("could not locate the top-level object".to_string()),
                )
            })?,
        };
        write_whole(&path, &patched)?;
        Ok(true)
    });
    finish(&path, outcome)
}

/// 생성된 할당 문서를 자체 설정 파일에 병합한다.
/// 기존 파일이 비었거나 읽을 수 없으면 실패 대신 새 내용으로 덮어쓰고, 그 사실을 결과에 남긴다.
pub fn merge_settings(path: &Path, generated: &Value) -> ConfigMergeResult {
    let mut replaced_unreadable = None;

    let existing = if path.exists() {
        match parse_config_file(path, true) {
            Ok(parsed) => Some(parsed.value),
            Err(err) => {
                warn!(error = %err, "existing settings unreadable, starting fresh");
                replaced_unreadable = Some(err.kind);
                None
            }
        }
    } else {
        None
    };

    let merged = match &existing {
        Some(current) => deep_merge(current, generated),
        None => generated.clone(),
    };

    let outcome = if existing.as_ref() == Some(&merged) {
        Ok(false)
    } else {
        render_pretty(path, &merged).and_then(|content| write_whole(path, &content).map(|_| true))
    };

    let result = finish(path, outcome);
    match replaced_unreadable {
        Some(kind) if result.success => result.with_replaced_unreadable(kind),
        _ => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::files::format::{HOST_CONFIG_JSON, HOST_CONFIG_JSONC};
    use serde_json::json;

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn creates_plain_config_when_none_exists() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("opencode");

        let result = ensure_plugin(&config_dir, "oh-my-opencode@latest");
        assert!(result.success && result.written);
        assert_eq!(result.config_path, config_dir.join(HOST_CONFIG_JSON));
        assert_eq!(
            read_json(&result.config_path),
            json!({"plugin": ["oh-my-opencode@latest"]})
        );
    }

    #[test]
    fn plain_ensure_is_idempotent_and_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSON);
        fs::write(&path, r#"{"theme": "dark", "plugin": ["oh-my-opencode@2.0.0"]}"#).unwrap();

        let first = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(first.written);
        let after_first = fs::read(&path).unwrap();

        let second = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(second.success && !second.written);
        assert_eq!(fs::read(&path).unwrap(), after_first);

        let value = read_json(&path);
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["plugin"], json!(["oh-my-opencode@latest"]));
    }

    #[test]
    fn commented_append_keeps_trailing_comments_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSONC);
        let raw = "{\n  // top comment\n  \"plugin\": [\"other-pkg\"]\n  // trailing comment about plugins\n}\n/* footer */\n";
        fs::write(&path, raw).unwrap();

        let result = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(result.success && result.written);
        let out = fs::read_to_string(&path).unwrap();
        assert!(out.contains("// top comment"));
        assert!(out.contains("  // trailing comment about plugins\n}\n/* footer */\n"));
        assert!(out.contains("\"plugin\": [\"other-pkg\", \"oh-my-opencode@latest\"]"));

        let again = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(!again.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), out);
    }

    #[test]
    fn commented_without_plugin_key_inserts_after_brace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSONC);
        fs::write(&path, "{\n  // theme\n  \"theme\": \"dark\",\n}\n").unwrap();

        let result = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(result.written);
        let out = fs::read_to_string(&path).unwrap();
        assert!(out.starts_with("{\n  \"plugin\": [\"oh-my-opencode@latest\"],\n  // theme\n"));
    }

    #[test]
    fn malformed_host_config_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSON);
        fs::write(&path, "{ \"plugin\": [").unwrap();

        let result = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(!result.success);
        assert!(matches!(result.error_kind, Some(ConfigErrorKind::Syntax(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"plugin\": [");
    }

    #[test]
    fn empty_host_config_reports_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(HOST_CONFIG_JSON), "").unwrap();
        let result = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert_eq!(result.error_kind, Some(ConfigErrorKind::Empty));
    }

    #[test]
    fn provider_blocks_in_commented_file_keep_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSONC);
        fs::write(&path, "{\n  // keep\n  \"plugin\": [\"a\"]\n}\n").unwrap();

        let blocks = json!({"openai": {"options": {"store": false}}});
        let result = merge_provider_blocks(dir.path(), &blocks);
        assert!(result.written);
        let out = fs::read_to_string(&path).unwrap();
        assert!(out.contains("// keep"));

        let parsed = crate::infrastructure::files::parser::parse_config_text(&out, true).unwrap();
        assert_eq!(parsed["provider"]["openai"]["options"]["store"], false);
        assert_eq!(parsed["plugin"], json!(["a"]));

        assert!(!merge_provider_blocks(dir.path(), &blocks).written);
    }

    #[test]
    fn repeated_plugin_key_edits_the_effective_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSONC);
        fs::write(
            &path,
            "{\"plugin\": [\"a\"], // superseded\n \"plugin\": [\"b\"]}\n",
        )
        .unwrap();

        let first = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(first.success && first.written);
        let out = fs::read_to_string(&path).unwrap();
        assert!(out.contains("// superseded"));

        let parsed = crate::infrastructure::files::parser::parse_config_text(&out, true).unwrap();
        assert_eq!(parsed["plugin"], json!(["b", "oh-my-opencode@latest"]));

        let second = ensure_plugin(dir.path(), "oh-my-opencode@latest");
        assert!(second.success && !second.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), out);
    }

    #[test]
    fn existing_provider_region_in_commented_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HOST_CONFIG_JSONC);
        let head = "{\n  // top\n  \"plugin\": [\"a\"],\n  \"provider\": ";
        let tail = ",\n  // t\n  \"theme\": \"dark\"\n}\n";
        fs::write(
            &path,
            format!("{head}{{\"ollama\": {{\"name\": \"Ollama\"}}}}{tail}"),
        )
        .unwrap();

        let blocks = json!({"openai": {"options": {"store": false}}});
        let result = merge_provider_blocks(dir.path(), &blocks);
        assert!(result.success && result.written);

        let out = fs::read_to_string(&path).unwrap();
        assert!(out.starts_with(head), "{out}");
        assert!(out.ends_with(tail), "{out}");

        let parsed = crate::infrastructure::files::parser::parse_config_text(&out, true).unwrap();
        assert_eq!(parsed["provider"]["ollama"]["name"], "Ollama");
        assert_eq!(parsed["provider"]["openai"]["options"]["store"], false);
        assert_eq!(parsed["theme"], "dark");

        let second = merge_provider_blocks(dir.path(), &blocks);
        assert!(second.success && !second.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), out);
    }

    #[test]
    fn settings_merge_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oh-my-opencode.json");
        fs::write(
            &path,
            r#"{"custom": {"x": 1}, "agents": {"oracle": {"model": "old", "temperature": 0.2}}}"#,
        )
        .unwrap();

        let generated = json!({"agents": {"oracle": {"model": "new"}}, "categories": {}});
        let result = merge_settings(&path, &generated);
        assert!(result.success && result.written);
        assert!(result.replaced_unreadable.is_none());

        let value = read_json(&path);
        assert_eq!(value["custom"]["x"], 1);
        assert_eq!(value["agents"]["oracle"]["model"], "new");
        assert_eq!(value["agents"]["oracle"]["temperature"], 0.2);

        assert!(!merge_settings(&path, &generated).written);
    }

    #[test]
    fn whitespace_only_settings_start_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oh-my-opencode.json");
        fs::write(&path, "   \n").unwrap();

        let generated = json!({"agents": {"oracle": {"model": "m"}}});
        let result = merge_settings(&path, &generated);
        assert!(result.success && result.written);
        assert_eq!(result.replaced_unreadable, Some(ConfigErrorKind::Empty));
        assert_eq!(read_json(&path), generated);
    }

    #[test]
    fn non_object_settings_start_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oh-my-opencode.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = merge_settings(&path, &json!({"agents": {}}));
        assert!(result.success);
        assert_eq!(
            result.replaced_unreadable,
            Some(ConfigErrorKind::WrongShape("an array".to_string()))
        );
    }

    #[test]
    fn permission_failure_is_reported_with_its_category() {
        let path = Path::new("/locked/oh-my-opencode.json");
        let err = io_error(path, &std::io::Error::from(std::io::ErrorKind::PermissionDenied));

        let result = finish(path, Err(err));
        assert!(!result.success && !result.written);
        assert_eq!(result.config_path, path);
        assert_eq!(result.error_kind, Some(ConfigErrorKind::PermissionDenied));
        assert!(result.error.as_deref().unwrap().starts_with("/locked/oh-my-opencode.json: permission denied"));
    }
}
