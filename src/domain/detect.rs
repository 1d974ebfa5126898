//! 기존 설정 문서로부터 현재 provider 구성을 역추정한다(update 모드 초기값).

use serde_json::Value;

use crate::domain::capability::ULTIMATE_FALLBACK_MODEL;
use crate::domain::host::{GEMINI_AUTH_PLUGIN, OPENAI_AUTH_PLUGIN};
use crate::domain::plugin::{PACKAGE_NAME, plugin_base_name};
use crate::domain::provider::{Provider, ProviderAvailability, SubscriptionTier};

/// 기존 설치가 감지된 경우에만 값이 채워진다.
pub fn detect_availability(
    host_config: Option<&Value>,
    settings: Option<&Value>,
) -> Option<ProviderAvailability> {
    let plugins = host_config
        .and_then(|cfg| cfg.get("plugin"))
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();

    if !plugins.iter().any(|p| plugin_base_name(p) == PACKAGE_NAME) {
        return None;
    }

    let has_plugin = |entry: &str| {
        let base = plugin_base_name(entry);
        plugins.iter().any(|p| plugin_base_name(p) == base)
    };

    let mut availability = ProviderAvailability {
        gemini: has_plugin(GEMINI_AUTH_PLUGIN),
        openai: has_plugin(OPENAI_AUTH_PLUGIN),
        ..Default::default()
    };

    for model in assigned_models(settings) {
        match Provider::from_model_id(model) {
            Some(Provider::Anthropic) => availability.anthropic = true,
            Some(Provider::OpenAi) => availability.openai = true,
            Some(Provider::Gemini) => availability.gemini = true,
            Some(Provider::Copilot) => availability.copilot = true,
            Some(Provider::ZaiCodingPlan) => availability.zai_coding_plan = true,
            Some(Provider::OpencodeZen) if model != ULTIMATE_FALLBACK_MODEL => {
                availability.opencode_zen = true;
            }
            _ => {}
        }
    }

    let orchestrator = settings
        .and_then(|s| s.pointer("/agents/sisyphus/model"))
        .and_then(Value::as_str);
    if availability.anthropic && orchestrator == Some("anthropic/claude-opus-4-5") {
        availability.anthropic_tier = SubscriptionTier::Max20;
    }

    Some(availability)
}

fn assigned_models(settings: Option<&Value>) -> Vec<&str> {
    let Some(settings) = settings else {
        return Vec::new();
    };

    ["agents", "categories"]
        .iter()
        .filter_map(|key| settings.get(*key).and_then(Value::as_object))
        .flat_map(|roles| roles.values())
        .filter_map(|role| role.get("model").and_then(Value::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolution::generate_settings;
    use serde_json::json;

    #[test]
    fn no_detection_without_own_plugin() {
        let host = json!({"plugin": ["other"]});
        assert_eq!(detect_availability(Some(&host), None), None);
        assert_eq!(detect_availability(None, None), None);
    }

    #[test]
    fn detects_flags_from_generated_settings() {
        let declared = ProviderAvailability {
            anthropic: true,
            anthropic_tier: SubscriptionTier::Max20,
            gemini: true,
            copilot: true,
            ..Default::default()
        };
        let settings = generate_settings(&declared).to_value();
        let host = json!({"plugin": ["oh-my-opencode@latest", GEMINI_AUTH_PLUGIN]});

        let detected = detect_availability(Some(&host), Some(&settings)).unwrap();
        assert!(detected.anthropic);
        assert!(detected.is_anthropic_max());
        assert!(detected.gemini);
        assert!(!detected.openai);
    }

    #[test]
    fn fallback_only_settings_detect_nothing() {
        let settings = generate_settings(&ProviderAvailability::default()).to_value();
        let host = json!({"plugin": ["oh-my-opencode"]});
        let detected = detect_availability(Some(&host), Some(&settings)).unwrap();
        assert!(!detected.any_provider());
    }
}
