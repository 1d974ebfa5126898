//! update 모드: 기존 설정에서 현재 provider 구성을 역추적하는 유스케이스.

use tracing::debug;

use crate::application::context::InstallContext;
use crate::application::ports::ConfigStore;
use crate::domain::detect::detect_availability;
use crate::domain::provider::ProviderAvailability;

pub struct DetectProvidersUseCase<'a> {
    pub store: &'a dyn ConfigStore,
}

impl<'a> DetectProvidersUseCase<'a> {
    /// 이전 설치 흔적이 없으면 None(신규 설치).
    pub fn execute(&self, ctx: &InstallContext) -> Option<ProviderAvailability> {
        let host = self.store.read_host_config(ctx);
        let settings = self.store.read_settings(ctx);
        let detected = detect_availability(host.as_ref(), settings.as_ref());
        debug!(update_mode = detected.is_some(), "provider detection finished");
        detected
    }
}
