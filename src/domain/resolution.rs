//! provider 사용 가능 여부 → agent/category별 모델 식별자 해석 엔진.
//!
//! 순수 함수만 포함한다. 파일/네트워크 접근 없음.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::capability::{
    ModelCapability, SECONDARY_POOL_MODEL, ULTIMATE_FALLBACK_MODEL,
};
use crate::domain::provider::{Provider, ProviderAvailability};

pub const SETTINGS_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/code-yeongyu/oh-my-opencode/master/assets/oh-my-opencode.schema.json";

/// 역할(agent/category) 이름별 요구 capability.
#[derive(Debug, Clone, Copy)]
pub struct RoleRequirement {
    pub name: &'static str,
    pub capability: ModelCapability,
    /// 추론 강도 등 출력에 그대로 전달되는 한정자
    pub variant: Option<&'static str>,
    /// Anthropic max20 등급일 때 high-reasoning으로 승격되는 역할인지 여부
    pub upgrade_on_max_tier: bool,
}

const fn role(
    name: &'static str,
    capability: ModelCapability,
    variant: Option<&'static str>,
) -> RoleRequirement {
    RoleRequirement {
        name,
        capability,
        variant,
        upgrade_on_max_tier: false,
    }
}

pub const AGENT_REQUIREMENTS: &[RoleRequirement] = &[
    RoleRequirement {
        name: "sisyphus",
        capability: ModelCapability::LowCost,
        variant: None,
        upgrade_on_max_tier: true,
    },
    role("oracle", ModelCapability::MaxReasoning, Some("high")),
    role("librarian", ModelCapability::Fast, None),
    role("explore", ModelCapability::Fast, None),
    role("multimodal-looker", ModelCapability::Vision, None),
    role("prometheus", ModelCapability::HighReasoning, Some("max")),
    role("metis", ModelCapability::HighReasoning, Some("max")),
    role("momus", ModelCapability::MaxReasoning, Some("medium")),
    role("atlas", ModelCapability::LowCost, None),
];

pub const CATEGORY_REQUIREMENTS: &[RoleRequirement] = &[
    role("visual-engineering", ModelCapability::Creative, None),
    role("ultrabrain", ModelCapability::MaxReasoning, Some("xhigh")),
    role("artistry", ModelCapability::Creative, Some("max")),
    role("quick", ModelCapability::Fast, None),
    role("unspecified-low", ModelCapability::LowCost, None),
    role("unspecified-high", ModelCapability::HighReasoning, None),
    role("writing", ModelCapability::Writing, None),
];

/// capability 하나를 fallback chain 순서대로 해석한다. 항상 비어 있지 않은 값을 반환한다.
pub fn resolve(capability: ModelCapability, availability: &ProviderAvailability) -> &'static str {
    let chain = capability.chain();

    if let Some((_, model)) = chain
        .native
        .iter()
        .find(|(provider, _)| availability.has(*provider))
    {
        return model;
    }
    if availability.copilot {
        return chain.pool_model;
    }
    if availability.zai_coding_plan {
        return SECONDARY_POOL_MODEL;
    }
    ULTIMATE_FALLBACK_MODEL
}

/// 역할의 실제 capability. 등급 승격은 chain 탐색 이전에 적용된다.
pub fn effective_capability(
    requirement: &RoleRequirement,
    availability: &ProviderAvailability,
) -> ModelCapability {
    if requirement.upgrade_on_max_tier
        && requirement.capability == ModelCapability::LowCost
        && availability.is_anthropic_max()
    {
        return ModelCapability::HighReasoning;
    }
    requirement.capability
}

/// 일반 chain을 우회하는 역할 전용 규칙. 해당 역할 이름에만 적용된다.
fn role_override(name: &str, availability: &ProviderAvailability) -> Option<&'static str> {
    match name {
        "librarian" if availability.has(Provider::ZaiCodingPlan) => Some(SECONDARY_POOL_MODEL),
        "explore" if availability.is_anthropic_max() => Some("anthropic/claude-haiku-4-5"),
        _ => None,
    }
}

/// 역할 하나의 모델을 해석한다.
pub fn resolve_role(
    requirement: &RoleRequirement,
    availability: &ProviderAvailability,
) -> &'static str {
    if let Some(model) = role_override(requirement.name, availability) {
        return model;
    }
    resolve(effective_capability(requirement, availability), availability)
}

/// 역할별 최종 모델 할당 값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelAssignment {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// 생성된 자체 설정 문서(`agents`/`categories`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSettings {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub agents: BTreeMap<String, ModelAssignment>,
    pub categories: BTreeMap<String, ModelAssignment>,
}

impl GeneratedSettings {
    pub fn to_value(&self) -> Value {
        // 구조체 직렬화는 실패하지 않는다(문자열 키 map만 포함).
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn assign_all(
    requirements: &[RoleRequirement],
    availability: &ProviderAvailability,
) -> BTreeMap<String, ModelAssignment> {
    requirements
        .iter()
        .map(|req| {
            (
                req.name.to_string(),
                ModelAssignment {
                    model: resolve_role(req, availability).to_string(),
                    variant: req.variant.map(str::to_string),
                },
            )
        })
        .collect()
}

/// provider 사용 가능 여부로 전체 할당 문서를 생성한다.
pub fn generate_settings(availability: &ProviderAvailability) -> GeneratedSettings {
    GeneratedSettings {
        schema: SETTINGS_SCHEMA_URL.to_string(),
        agents: assign_all(AGENT_REQUIREMENTS, availability),
        categories: assign_all(CATEGORY_REQUIREMENTS, availability),
    }
}

pub fn agent_requirement(name: &str) -> Option<&'static RoleRequirement> {
    AGENT_REQUIREMENTS.iter().find(|r| r.name == name)
}
