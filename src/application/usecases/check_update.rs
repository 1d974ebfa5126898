//! 최신 버전 확인 유스케이스.

use semver::Version;

use crate::application::context::InstallContext;
use crate::application::ports::PackageRegistry;

/// 업데이트 안내 메시지 생성용 데이터.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub current_version: String,
    pub latest_version: String,
}

/// 레지스트리의 최신 게시 버전을 조회하고 업데이트 필요 여부를 판단한다.
pub struct CheckUpdateUseCase<'a> {
    pub registry: &'a dyn PackageRegistry,
}

impl<'a> CheckUpdateUseCase<'a> {
    /// 최신 버전이 있을 때만 안내 정보를 반환한다.
    /// - 네트워크 오류는 설치 흐름을 막지 않기 위해 조용히 무시한다.
    pub async fn execute(&self, ctx: &InstallContext) -> Option<UpdateNotice> {
        let latest = self.registry.latest_version(ctx.package_name()).await?;
        if !is_newer_version(ctx.current_version(), &latest) {
            return None;
        }

        Some(UpdateNotice {
            current_version: ctx.current_version().to_string(),
            latest_version: latest,
        })
    }
}

fn is_newer_version(current: &str, latest: &str) -> bool {
    let parse = |raw: &str| Version::parse(raw.trim().trim_start_matches('v')).ok();
    match (parse(current), parse(latest)) {
        (Some(current), Some(latest)) => latest > current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_semver_values() {
        assert!(is_newer_version("3.0.0", "3.0.1"));
        assert!(is_newer_version("3.0.0-beta.1", "3.0.0"));
        assert!(is_newer_version("v1.2.3", "v1.10.0"));
        assert!(!is_newer_version("3.0.0", "3.0.0"));
        assert!(!is_newer_version("3.1.0", "3.0.9"));
        assert!(!is_newer_version("3.0.0", "not-a-version"));
    }
}
