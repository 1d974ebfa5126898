//! 설치 도구 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고, 실행 진단용 정보를 함께 제공한다.

mod inspection;
mod loader;
mod locate;

use anyhow::Result;

pub use crate::application::config::{Config, DefaultsConfig};
pub use inspection::{ConfigInspection, EffectiveDefaults, HostInspection, ProvidersInspection};
pub use loader::config_paths;
pub use locate::{default_opencode_config_dir, resolve_config_dir};

use crate::application::context::InstallContext;
use crate::domain::provider::ProviderAvailability;
use crate::infrastructure::files::DetectedConfig;

impl Config {
    /// 병합된 최종 설정을 로딩한다.
    pub fn load() -> Result<Self> {
        Ok(loader::load_merged_config()?.config)
    }

    /// 디버깅/진단용 설정 정보를 구성한다.
    pub fn inspect(
        ctx: &InstallContext,
        host: DetectedConfig,
        detected: Option<ProviderAvailability>,
    ) -> Result<ConfigInspection> {
        let loaded = loader::load_merged_config()?;
        Ok(ConfigInspection::from_loaded(loaded, ctx, host, detected))
    }
}
