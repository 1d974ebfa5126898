//! 설치할 plugin 항목(`name@tag` 또는 `name@version`)을 결정하는 유스케이스.

use tracing::debug;

use crate::application::context::InstallContext;
use crate::application::ports::PackageRegistry;
use crate::domain::plugin::plugin_entry;

pub struct PluginVersionUseCase<'a> {
    pub registry: &'a dyn PackageRegistry,
}

impl<'a> PluginVersionUseCase<'a> {
    /// 현재 버전과 일치하는 배포 태그를 찾는다. 조회 실패 시 버전 고정 항목으로 대체한다.
    pub async fn execute(&self, ctx: &InstallContext) -> String {
        let tags = self.registry.dist_tags(ctx.package_name()).await;
        if tags.is_none() {
            debug!(package = ctx.package_name(), "dist-tags unavailable, pinning version");
        }
        plugin_entry(ctx.package_name(), ctx.current_version(), tags.as_ref())
    }
}
