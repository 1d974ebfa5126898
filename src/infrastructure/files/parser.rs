//! 설정 파일 tolerant 파서.
//!
//! 실패 원인을 파싱 전에 먼저 분류한다(빈 파일, 공백만 있는 파일, 문법 오류, 최상위 타입 불일치).

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::errors::io_error;
use super::jsonc::to_strict_json;
use crate::domain::diagnostic::{ConfigError, ConfigErrorKind};

/// 파일을 읽어 최상위 객체를 반환한다. 원문 텍스트도 함께 돌려준다.
pub fn parse_config_file(path: &Path, commented: bool) -> Result<ParsedConfig, ConfigError> {
    let bytes = fs::read(path).map_err(|err| io_error(path, &err))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read config file");

    let raw = String::from_utf8(bytes).map_err(|_| {
        ConfigError::new(
            path,
            ConfigErrorKind::Syntax("file is not valid UTF-8".to_string()),
        )
    })?;
    let value = parse_config_text(&raw, commented).map_err(|kind| ConfigError::new(path, kind))?;

    Ok(ParsedConfig { raw, value })
}

#[derive(Debug, Clone)]
pub struct ParsedConfig {
    pub raw: String,
    pub value: Value,
}

/// 텍스트를 파싱한다. 주석 형식이면 주석/trailing comma를 먼저 가린다.
pub fn parse_config_text(raw: &str, commented: bool) -> Result<Value, ConfigErrorKind> {
    if raw.trim().is_empty() {
        return Err(ConfigErrorKind::Empty);
    }

    let strict = if commented {
        to_strict_json(raw)
    } else {
        raw.to_string()
    };
    // 주석만 있는 파일도 빈 파일로 취급한다.
    if strict.trim().is_empty() {
        return Err(ConfigErrorKind::Empty);
    }

    let value: Value =
        serde_json::from_str(&strict).map_err(|err| ConfigErrorKind::Syntax(err.to_string()))?;
    if !value.is_object() {
        return Err(ConfigErrorKind::WrongShape(describe_type(&value).to_string()));
    }
    Ok(value)
}

fn describe_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
