//! host 설정/자체 설정 파일 저장소 포트 구현 어댑터.

use serde_json::Value;
use tracing::debug;

use crate::application::context::InstallContext;
use crate::application::ports::ConfigStore;
use crate::domain::diagnostic::ConfigMergeResult;
use crate::infrastructure::files::{
    ConfigFormat, DetectedConfig, detect_config_format, parse_config_file, writer,
};

/// 로컬 파일시스템 기반 저장소 어댑터.
pub struct FsConfigStore;

impl ConfigStore for FsConfigStore {
    fn detect_host_config(&self, ctx: &InstallContext) -> DetectedConfig {
        detect_config_format(ctx.config_dir())
    }

    fn read_host_config(&self, ctx: &InstallContext) -> Option<Value> {
        let detected = detect_config_format(ctx.config_dir());
        if detected.format == ConfigFormat::None {
            return None;
        }
        let commented = detected.format == ConfigFormat::Commented;
        match parse_config_file(&detected.path, commented) {
            Ok(parsed) => Some(parsed.value),
            Err(err) => {
                debug!(error = %err, "host config unreadable, ignoring for detection");
                None
            }
        }
    }

    fn read_settings(&self, ctx: &InstallContext) -> Option<Value> {
        let path = ctx.settings_path();
        if !path.exists() {
            return None;
        }
        parse_config_file(&path, true)
            .map(|parsed| parsed.value)
            .map_err(|err| debug!(error = %err, "settings unreadable, ignoring for detection"))
            .ok()
    }

    fn ensure_plugins(&self, ctx: &InstallContext, entries: &[String]) -> ConfigMergeResult {
        writer::ensure_plugins(ctx.config_dir(), entries)
    }

    fn merge_provider_blocks(&self, ctx: &InstallContext, blocks: &Value) -> ConfigMergeResult {
        writer::merge_provider_blocks(ctx.config_dir(), blocks)
    }

    fn merge_settings(&self, ctx: &InstallContext, generated: &Value) -> ConfigMergeResult {
        writer::merge_settings(&ctx.settings_path(), generated)
    }
}
