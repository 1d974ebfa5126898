//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::application::availability::args_from_availability;
use crate::application::config::DefaultsConfig;
use crate::application::context::InstallContext;
use crate::domain::provider::ProviderAvailability;
use crate::infrastructure::files::{ConfigFormat, DetectedConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub host: HostInspection,
    pub providers: ProvidersInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub registry_url: String,
    pub registry_timeout_ms: u64,
    pub config_dir: String,
    pub check_update: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub format: ConfigFormat,
    pub config_path: String,
    pub settings_path: String,
    pub settings_exists: bool,
}

/// update 모드에서 마법사 초기값으로 쓰일 감지 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ProvidersInspection {
    pub update_mode: bool,
    pub enabled: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_args: Option<Vec<String>>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(
        loaded: LoadedConfig,
        ctx: &InstallContext,
        host: DetectedConfig,
        detected: Option<ProviderAvailability>,
    ) -> Self {
        let settings_path = ctx.settings_path();

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: loaded.config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                registry_url: loaded.config.registry_url(),
                registry_timeout_ms: loaded.config.registry_timeout_ms(),
                config_dir: ctx.config_dir().display().to_string(),
                check_update: loaded.config.check_update(),
            },
            host: HostInspection {
                format: host.format,
                config_path: host.path.display().to_string(),
                settings_exists: settings_path.exists(),
                settings_path: settings_path.display().to_string(),
            },
            providers: providers_inspection(detected),
        }
    }
}

fn providers_inspection(detected: Option<ProviderAvailability>) -> ProvidersInspection {
    let Some(availability) = detected else {
        return ProvidersInspection {
            update_mode: false,
            enabled: Vec::new(),
            install_args: None,
        };
    };

    let args = args_from_availability(&availability);
    let flags = [
        ("claude", args.claude),
        ("openai", args.openai),
        ("gemini", args.gemini),
        ("copilot", args.copilot),
        ("opencode-zen", args.opencode_zen),
        ("zai-coding-plan", args.zai_coding_plan),
    ];

    ProvidersInspection {
        update_mode: true,
        enabled: availability
            .enabled_ids()
            .into_iter()
            .map(str::to_string)
            .collect(),
        install_args: Some(
            flags
                .into_iter()
                .filter_map(|(flag, value)| value.map(|v| format!("--{flag}={v}")))
                .collect(),
        ),
    }
}
