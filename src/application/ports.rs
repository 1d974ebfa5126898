//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::application::config::Config;
use crate::application::context::InstallContext;
use crate::domain::diagnostic::ConfigMergeResult;
use crate::infrastructure::files::DetectedConfig;

/// 설치 도구 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self, ctx: &InstallContext) -> Result<String>;
}

/// 패키지 레지스트리 읽기 전용 조회 포트.
/// 타임아웃/비정상 응답/네트워크 오류는 모두 None으로 표현한다.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn latest_version(&self, package: &str) -> Option<String>;
    async fn dist_tags(&self, package: &str) -> Option<BTreeMap<String, String>>;
}

/// host 설정/자체 설정 파일 접근 포트.
pub trait ConfigStore: Send + Sync {
    fn detect_host_config(&self, ctx: &InstallContext) -> DetectedConfig;
    /// 기존 host 설정/자체 설정 문서. 없거나 읽을 수 없으면 None.
    fn read_host_config(&self, ctx: &InstallContext) -> Option<Value>;
    fn read_settings(&self, ctx: &InstallContext) -> Option<Value>;
    fn ensure_plugins(&self, ctx: &InstallContext, entries: &[String]) -> ConfigMergeResult;
    fn merge_provider_blocks(&self, ctx: &InstallContext, blocks: &Value) -> ConfigMergeResult;
    fn merge_settings(&self, ctx: &InstallContext, generated: &Value) -> ConfigMergeResult;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
