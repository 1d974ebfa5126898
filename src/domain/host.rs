//! host 설정(opencode.json)에 추가되는 인증 plugin/provider 블록 정의.

use serde_json::{Map, Value, json};

use crate::domain::merge::merge_into;
use crate::domain::plugin::ensure_plugin_entry;
use crate::domain::provider::ProviderAvailability;

/// host 설정 문서. `plugin`만 해석하고 나머지 key는 원래 순서대로 보존한다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostConfigDocument {
    root: Map<String, Value>,
}

impl HostConfigDocument {
    /// 최상위 객체가 아니면 None.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// `plugin` 목록의 문자열 항목. 키가 없거나 배열이 아니면 빈 목록.
    pub fn plugins(&self) -> Vec<String> {
        self.root
            .get("plugin")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 각 항목을 idempotent하게 반영한다. 하나라도 바뀌면 true.
    pub fn ensure_plugins(&mut self, entries: &[String]) -> bool {
        let mut plugins = self.plugins();
        let mut changed = false;
        for entry in entries {
            changed |= ensure_plugin_entry(&mut plugins, entry).changed();
        }
        // 문자열이 아닌 항목이 섞여 있었다면 정리된 목록으로 다시 써야 한다.
        let list_is_clean = match self.root.get("plugin") {
            None => plugins.is_empty(),
            Some(Value::Array(items)) => items.len() == plugins.len(),
            Some(_) => false,
        };
        if changed || !list_is_clean {
            self.root.insert(
                "plugin".to_string(),
                Value::Array(plugins.into_iter().map(Value::String).collect()),
            );
            return true;
        }
        false
    }

    /// `provider` 아래에 블록을 deep merge한다. 변경이 있으면 true.
    pub fn merge_provider_blocks(&mut self, blocks: &Value) -> bool {
        let before = self.root.get("provider").cloned();
        let mut provider = before.clone().unwrap_or_else(|| Value::Object(Map::new()));
        merge_into(&mut provider, blocks);
        if before.as_ref() == Some(&provider) {
            return false;
        }
        self.root.insert("provider".to_string(), provider);
        true
    }
}

pub const GEMINI_AUTH_PLUGIN: &str = "opencode-antigravity-auth@1.2.8";
pub const OPENAI_AUTH_PLUGIN: &str = "opencode-openai-codex-auth@4.2.0";

/// 활성 provider에 필요한 인증 plugin 목록.
pub fn auth_plugins(availability: &ProviderAvailability) -> Vec<&'static str> {
    let mut plugins = Vec::new();
    if availability.gemini {
        plugins.push(GEMINI_AUTH_PLUGIN);
    }
    if availability.openai {
        plugins.push(OPENAI_AUTH_PLUGIN);
    }
    plugins
}

/// `provider` 키 아래에 병합할 블록. 필요한 블록이 없으면 None.
pub fn provider_blocks(availability: &ProviderAvailability) -> Option<Value> {
    let mut blocks = serde_json::Map::new();

    if availability.gemini {
        blocks.insert(
            "google".to_string(),
            json!({
                "name": "Google",
                "models": {
                    "gemini-3-pro-preview": {
                        "name": "Gemini 3 Pro (Antigravity)",
                        "limit": { "context": 1_048_576, "output": 65_535 },
                        "modalities": { "input": ["text", "image", "pdf"], "output": ["text"] }
                    },
                    "gemini-3-flash-preview": {
                        "name": "Gemini 3 Flash (Antigravity)",
                        "limit": { "context": 1_048_576, "output": 65_536 },
                        "modalities": { "input": ["text", "image", "pdf"], "output": ["text"] }
                    }
                }
            }),
        );
    }

    if availability.openai {
        blocks.insert(
            "openai".to_string(),
            json!({
                "options": {
                    "reasoningEffort": "medium",
                    "reasoningSummary": "auto",
                    "textVerbosity": "medium",
                    "include": ["reasoning.encrypted_content"],
                    "store": false
                }
            }),
        );
    }

    if blocks.is_empty() {
        None
    } else {
        Some(Value::Object(blocks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_blocks_without_gemini_or_openai() {
        let availability = ProviderAvailability {
            anthropic: true,
            copilot: true,
            ..Default::default()
        };
        assert!(auth_plugins(&availability).is_empty());
        assert!(provider_blocks(&availability).is_none());
    }

    #[test]
    fn gemini_and_openai_add_plugins_and_blocks() {
        let availability = ProviderAvailability {
            gemini: true,
            openai: true,
            ..Default::default()
        };
        assert_eq!(
            auth_plugins(&availability),
            vec![GEMINI_AUTH_PLUGIN, OPENAI_AUTH_PLUGIN]
        );
        let blocks = provider_blocks(&availability).unwrap();
        assert!(blocks["google"]["models"]["gemini-3-pro-preview"].is_object());
        assert_eq!(blocks["openai"]["options"]["store"], false);
    }

    #[test]
    fn document_keeps_unknown_keys_in_their_original_order() {
        let value = json!({"theme": "dark", "plugin": ["a"], "share": "manual"});
        let mut doc = HostConfigDocument::from_value(value).unwrap();
        assert!(doc.ensure_plugins(&["oh-my-opencode@latest".to_string()]));

        let out = doc.into_value();
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["theme", "plugin", "share"]);
        assert_eq!(out["plugin"], json!(["a", "oh-my-opencode@latest"]));
    }

    #[test]
    fn ensure_plugins_is_idempotent() {
        let mut doc = HostConfigDocument::from_value(json!({})).unwrap();
        let entries = vec!["oh-my-opencode@latest".to_string(), GEMINI_AUTH_PLUGIN.to_string()];
        assert!(doc.ensure_plugins(&entries));
        assert!(!doc.ensure_plugins(&entries));
        assert_eq!(doc.plugins().len(), 2);
    }

    #[test]
    fn non_string_plugin_items_are_dropped() {
        let mut doc = HostConfigDocument::from_value(json!({"plugin": ["a", 1, null]})).unwrap();
        assert!(doc.ensure_plugins(&["a".to_string()]));
        assert_eq!(doc.into_value()["plugin"], json!(["a"]));

        let mut doc = HostConfigDocument::from_value(json!({"plugin": "a"})).unwrap();
        assert!(doc.ensure_plugins(&["b".to_string()]));
        assert_eq!(doc.into_value()["plugin"], json!(["b"]));
    }

    #[test]
    fn provider_blocks_merge_without_touching_user_providers() {
        let mut doc = HostConfigDocument::from_value(json!({
            "provider": {"ollama": {"npm": "x"}, "google": {"name": "Mine"}}
        }))
        .unwrap();
        let blocks = provider_blocks(&ProviderAvailability {
            gemini: true,
            ..Default::default()
        })
        .unwrap();

        assert!(doc.merge_provider_blocks(&blocks));
        assert!(!doc.merge_provider_blocks(&blocks));
        let out = doc.into_value();
        assert_eq!(out["provider"]["ollama"]["npm"], "x");
        assert_eq!(out["provider"]["google"]["name"], "Google");
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(HostConfigDocument::from_value(json!([1])).is_none());
    }
}
