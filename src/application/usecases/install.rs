//! 설치 유스케이스.
//!
//! 흐름:
//! 1) plugin 항목 버전 결정(레지스트리 조회, 실패 시 버전 고정)
//! 2) host 설정: plugin/auth plugin 보장 → provider 블록 병합
//! 3) 자체 설정: 모델 할당 생성 → 기존 문서와 deep merge
//!
//! 두 대상 파일은 트랜잭션으로 묶이지 않는다. 한쪽만 성공하면 `Partial`로 보고한다.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::application::context::InstallContext;
use crate::application::ports::{ConfigStore, PackageRegistry, Reporter};
use crate::application::usecases::plugin_version::PluginVersionUseCase;
use crate::domain::diagnostic::ConfigMergeResult;
use crate::domain::host::{auth_plugins, provider_blocks};
use crate::domain::provider::ProviderAvailability;
use crate::domain::resolution::generate_settings;

/// 쓰기 전에 계산한 설치 계획.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallPlan {
    /// 자체 plugin 항목이 맨 앞, auth plugin이 뒤따른다.
    pub plugin_entries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_blocks: Option<Value>,
    pub settings: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    Complete,
    /// 한쪽 파일만 갱신됨. 롤백하지 않는다.
    Partial,
    Failed,
}

impl InstallOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Complete => 0,
            Self::Failed => 1,
            Self::Partial => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallReport {
    pub plugin_entry: String,
    pub host: ConfigMergeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_blocks: Option<ConfigMergeResult>,
    pub settings: ConfigMergeResult,
    pub outcome: InstallOutcome,
}

impl InstallReport {
    fn host_succeeded(&self) -> bool {
        self.host.success && self.provider_blocks.as_ref().is_none_or(|r| r.success)
    }
}

pub struct InstallUseCase<'a> {
    pub store: &'a dyn ConfigStore,
    pub registry: &'a dyn PackageRegistry,
    pub reporter: &'a dyn Reporter,
}

impl<'a> InstallUseCase<'a> {
    /// 파일을 건드리지 않고 설치 계획만 계산한다.
    pub async fn plan(
        &self,
        ctx: &InstallContext,
        availability: &ProviderAvailability,
    ) -> InstallPlan {
        let entry = PluginVersionUseCase {
            registry: self.registry,
        }
        .execute(ctx)
        .await;

        let mut plugin_entries = vec![entry];
        plugin_entries.extend(auth_plugins(availability).into_iter().map(str::to_string));

        InstallPlan {
            plugin_entries,
            provider_blocks: provider_blocks(availability),
            settings: generate_settings(availability).to_value(),
        }
    }

    pub async fn execute(
        &self,
        ctx: &InstallContext,
        availability: &ProviderAvailability,
    ) -> InstallReport {
        self.reporter.section("Install");
        self.reporter
            .kv("config dir", &ctx.config_dir().display().to_string());
        self.reporter.kv("providers", &describe_providers(availability));

        let plan = self.plan(ctx, availability).await;
        let plugin_entry = plan.plugin_entries.first().cloned().unwrap_or_default();
        self.reporter.kv("plugin", &plugin_entry);

        let host = self.store.ensure_plugins(ctx, &plan.plugin_entries);
        self.report_result("host", &host);

        // plugin 단계가 실패한 파일에는 provider 블록을 쓰지 않는다.
        let provider_result = match (&plan.provider_blocks, host.success) {
            (Some(blocks), true) => {
                let result = self.store.merge_provider_blocks(ctx, blocks);
                self.report_result("provider", &result);
                Some(result)
            }
            _ => None,
        };

        let settings = self.store.merge_settings(ctx, &plan.settings);
        self.report_result("settings", &settings);

        let mut report = InstallReport {
            plugin_entry,
            host,
            provider_blocks: provider_result,
            settings,
            outcome: InstallOutcome::Failed,
        };
        report.outcome = match (report.host_succeeded(), report.settings.success) {
            (true, true) => InstallOutcome::Complete,
            (false, false) => InstallOutcome::Failed,
            _ => InstallOutcome::Partial,
        };

        info!(outcome = ?report.outcome, "install finished");
        self.reporter.kv("result", outcome_label(report.outcome));
        report
    }

    fn report_result(&self, scope: &str, result: &ConfigMergeResult) {
        let path = result.config_path.display();
        let message = match (&result.error, result.written) {
            (Some(error), _) => format!("failed: {error}"),
            (None, true) => format!("written {path}"),
            (None, false) => format!("unchanged {path}"),
        };
        self.reporter.status(scope, &message);

        if let Some(kind) = &result.replaced_unreadable {
            self.reporter.status(
                scope,
                &format!("previous content was unreadable and has been replaced ({kind})"),
            );
        }
    }
}

fn describe_providers(availability: &ProviderAvailability) -> String {
    let ids = availability.enabled_ids();
    if ids.is_empty() {
        return "none (fallback models only)".to_string();
    }
    let mut text = ids.join(", ");
    if availability.is_anthropic_max() {
        text.push_str(" [claude max20]");
    }
    text
}

fn outcome_label(outcome: InstallOutcome) -> &'static str {
    match outcome {
        InstallOutcome::Complete => "complete",
        InstallOutcome::Partial => "partial: one config file was not updated, see errors above",
        InstallOutcome::Failed => "failed",
    }
}
