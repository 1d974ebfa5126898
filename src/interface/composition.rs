//! 애플리케이션 조립(composition root) 모듈.

use std::path::Path;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::context::InstallContext;
use crate::application::usecases::check_update::CheckUpdateUseCase;
use crate::application::usecases::detect_providers::DetectProvidersUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::install::InstallUseCase;
use crate::application::usecases::resolve_models::ResolveModelsUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, FsConfigStore, HttpPackageRegistry, JsonConfigRepository,
};
use crate::infrastructure::config::resolve_config_dir;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Config,
    config_repo: JsonConfigRepository,
    store: FsConfigStore,
    registry: HttpPackageRegistry,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppComposition {
    /// 로딩된 설치 도구 설정으로 어댑터를 구성한다.
    pub fn new(config: Config) -> Self {
        let registry =
            HttpPackageRegistry::new(config.registry_url(), config.registry_timeout_ms());
        Self {
            config,
            config_repo: JsonConfigRepository,
            store: FsConfigStore,
            registry,
            reporter: ConsoleReporter::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 실행 1회용 설치 컨텍스트를 만든다.
    pub fn context(&self, config_dir: Option<&Path>) -> Result<InstallContext> {
        let dir = resolve_config_dir(config_dir, &self.config)?;
        Ok(InstallContext::new(dir, env!("CARGO_PKG_VERSION")))
    }

    /// 기존 설치 감지 유스케이스를 생성한다.
    pub fn detect_providers_usecase(&self) -> DetectProvidersUseCase<'_> {
        DetectProvidersUseCase { store: &self.store }
    }

    /// 설치 유스케이스를 생성한다.
    pub fn install_usecase(&self) -> InstallUseCase<'_> {
        InstallUseCase {
            store: &self.store,
            registry: &self.registry,
            reporter: &self.reporter,
        }
    }

    /// 모델 할당 미리보기 유스케이스를 생성한다.
    pub fn resolve_models_usecase(&self) -> ResolveModelsUseCase {
        ResolveModelsUseCase
    }

    /// 최신 버전 알림 유스케이스를 생성한다.
    pub fn check_update_usecase(&self) -> CheckUpdateUseCase<'_> {
        CheckUpdateUseCase {
            registry: &self.registry,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    pub fn reporter(&self) -> &ConsoleReporter {
        &self.reporter
    }
}
