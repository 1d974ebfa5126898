//! host 설정 파일 형식 탐지.

use std::path::{Path, PathBuf};

use serde::Serialize;

pub const HOST_CONFIG_JSON: &str = "opencode.json";
pub const HOST_CONFIG_JSONC: &str = "opencode.jsonc";

/// 디스크에 존재하는 설정 표현 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// 주석 허용 JSON(`.jsonc`)
    Commented,
    /// 일반 JSON(`.json`)
    Plain,
    /// 파일 없음
    None,
}

/// 탐지 결과. 파일이 없으면 새로 만들 plain 경로를 가리킨다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedConfig {
    pub format: ConfigFormat,
    pub path: PathBuf,
}

/// `.jsonc` → `.json` 순서로 검사한다. 부작용 없음.
pub fn detect_config_format(config_dir: &Path) -> DetectedConfig {
    let jsonc = config_dir.join(HOST_CONFIG_JSONC);
    if jsonc.exists() {
        return DetectedConfig {
            format: ConfigFormat::Commented,
            path: jsonc,
        };
    }

    let json = config_dir.join(HOST_CONFIG_JSON);
    if json.exists() {
        return DetectedConfig {
            format: ConfigFormat::Plain,
            path: json,
        };
    }

    DetectedConfig {
        format: ConfigFormat::None,
        path: json,
    }
}
