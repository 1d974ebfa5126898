//! 설정 저장소 포트 구현 어댑터.

use anyhow::Result;

use super::config_store::FsConfigStore;
use crate::application::context::InstallContext;
use crate::application::ports::{ConfigRepository, ConfigStore};
use crate::domain::detect::detect_availability;
use crate::infrastructure::config;

/// JSON 기반 설정 저장소 어댑터.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<config::Config> {
        config::Config::load()
    }

    fn inspect_pretty_json(&self, ctx: &InstallContext) -> Result<String> {
        let store = FsConfigStore;
        let host = store.detect_host_config(ctx);
        let detected = detect_availability(
            store.read_host_config(ctx).as_ref(),
            store.read_settings(ctx).as_ref(),
        );
        let inspection = config::Config::inspect(ctx, host, detected)?;
        Ok(serde_json::to_string_pretty(&inspection)?)
    }
}
