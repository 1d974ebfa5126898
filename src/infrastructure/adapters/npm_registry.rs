//! npm 레지스트리 조회 포트 구현 어댑터.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::application::config::{DEFAULT_REGISTRY_TIMEOUT_MS, DEFAULT_REGISTRY_URL};
use crate::application::ports::PackageRegistry;

/// 패키지 이름 한 세그먼트로 안전하게 보낼 수 있도록 `/`만 인코딩되게 한다.
const PACKAGE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// HTTP로 npm 레지스트리를 조회하는 어댑터.
/// 모든 실패(전송 오류, 타임아웃, 비정상 상태, 잘못된 본문)는 None으로 수렴한다.
pub struct HttpPackageRegistry {
    base_url: String,
    timeout_ms: u64,
}

impl Default for HttpPackageRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL, DEFAULT_REGISTRY_TIMEOUT_MS)
    }
}

impl HttpPackageRegistry {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    fn endpoint(&self, path: &str) -> Option<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path)).ok()
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Option<T> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .ok()?;

        let resp = match client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(err) => {
                debug!(%url, error = %err, timeout = err.is_timeout(), "registry request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            debug!(%url, status = %resp.status(), "registry returned non-success status");
            return None;
        }

        let body = resp.text().await.ok()?;
        serde_json::from_str(&body).ok()
    }
}

fn encode_package(package: &str) -> String {
    utf8_percent_encode(package, PACKAGE_SEGMENT).to_string()
}

#[async_trait]
impl PackageRegistry for HttpPackageRegistry {
    async fn latest_version(&self, package: &str) -> Option<String> {
        let url = self.endpoint(&format!("{}/latest", encode_package(package)))?;
        let manifest: LatestManifest = self.fetch_json(url).await?;
        let version = manifest.version.trim();
        (!version.is_empty()).then(|| version.to_string())
    }

    async fn dist_tags(&self, package: &str) -> Option<BTreeMap<String, String>> {
        let url = self.endpoint(&format!("-/package/{}/dist-tags", encode_package(package)))?;
        let tags: BTreeMap<String, String> = self.fetch_json(url).await?;
        (!tags.is_empty()).then_some(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_names_keep_the_at_sign_and_encode_the_slash() {
        assert_eq!(encode_package("oh-my-opencode"), "oh-my-opencode");
        assert_eq!(encode_package("@scope/pkg.name"), "@scope%2Fpkg.name");
    }

    #[test]
    fn endpoints_are_built_under_the_base_url() {
        let registry = HttpPackageRegistry::new("https://registry.example.com/", 100);
        let url = registry
            .endpoint(&format!("-/package/{}/dist-tags", encode_package("@a/b")))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://registry.example.com/-/package/@a%2Fb/dist-tags"
        );
    }

    #[tokio::test]
    async fn unreachable_registry_yields_none() {
        // 포트 0으로는 연결할 수 없다.
        let registry = HttpPackageRegistry::new("http://127.0.0.1:0", 200);
        assert_eq!(registry.latest_version("oh-my-opencode").await, None);
        assert_eq!(registry.dist_tags("oh-my-opencode").await, None);
    }
}
