//! 설치 도구 자체 동작 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const DEFAULT_REGISTRY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 패키지 레지스트리 베이스 URL
    pub registry_url: Option<String>,
    /// 레지스트리 조회 타임아웃(ms)
    pub registry_timeout_ms: Option<u64>,
    /// host 설정 디렉터리 override
    pub config_dir: Option<String>,
    /// 설치 후 최신 버전 안내 여부(기본 true)
    pub check_update: Option<bool>,
}

impl Config {
    pub fn registry_url(&self) -> String {
        self.defaults
            .registry_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_REGISTRY_URL)
            .to_string()
    }

    pub fn registry_timeout_ms(&self) -> u64 {
        self.defaults
            .registry_timeout_ms
            .unwrap_or(DEFAULT_REGISTRY_TIMEOUT_MS)
    }

    pub fn check_update(&self) -> bool {
        self.defaults.check_update.unwrap_or(true)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.registry_url.is_some() {
            self.registry_url = other.registry_url;
        }
        if other.registry_timeout_ms.is_some() {
            self.registry_timeout_ms = other.registry_timeout_ms;
        }
        if other.config_dir.is_some() {
            self.config_dir = other.config_dir;
        }
        if other.check_update.is_some() {
            self.check_update = other.check_update;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.registry_url(), DEFAULT_REGISTRY_URL);
        assert_eq!(config.registry_timeout_ms(), DEFAULT_REGISTRY_TIMEOUT_MS);
        assert!(config.check_update());
    }

    #[test]
    fn later_values_override_field_by_field() {
        let mut base: Config = serde_json::from_str(
            r#"{"defaults": {"registry_url": "https://a.example/", "registry_timeout_ms": 100}}"#,
        )
        .unwrap();
        let over: Config =
            serde_json::from_str(r#"{"defaults": {"registry_timeout_ms": 200, "check_update": false}}"#)
                .unwrap();
        base.merge_from(over);

        assert_eq!(base.registry_url(), "https://a.example");
        assert_eq!(base.registry_timeout_ms(), 200);
        assert!(!base.check_update());
    }
}
