//! 설치 시점에 선언된 provider 사용 가능 여부(구독 정보) 값 객체.

use std::fmt;

/// 모델 식별자를 제공하는 provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    OpenAi,
    Gemini,
    OpencodeZen,
    /// 여러 모델을 하나의 구독으로 제공하는 1차 풀(pool) provider
    Copilot,
    /// 고정 모델 하나만 제공하는 2차 풀 provider
    ZaiCodingPlan,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Anthropic,
        Provider::OpenAi,
        Provider::Gemini,
        Provider::OpencodeZen,
        Provider::Copilot,
        Provider::ZaiCodingPlan,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Gemini => "google",
            Provider::OpencodeZen => "opencode",
            Provider::Copilot => "github-copilot",
            Provider::ZaiCodingPlan => "zai-coding-plan",
        }
    }

    /// 모델 식별자 접두어(`<provider>/<model>`)로 provider를 역추적한다.
    pub fn from_model_id(model: &str) -> Option<Self> {
        let (prefix, _) = model.split_once('/')?;
        Self::ALL.into_iter().find(|p| p.id() == prefix)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Anthropic 구독 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionTier {
    #[default]
    Standard,
    Max20,
}

/// 1회 해석(resolution) 동안 변하지 않는 provider 사용 가능 플래그 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProviderAvailability {
    pub anthropic: bool,
    pub anthropic_tier: SubscriptionTier,
    pub openai: bool,
    pub gemini: bool,
    pub opencode_zen: bool,
    pub copilot: bool,
    pub zai_coding_plan: bool,
}

impl ProviderAvailability {
    pub fn has(&self, provider: Provider) -> bool {
        match provider {
            Provider::Anthropic => self.anthropic,
            Provider::OpenAi => self.openai,
            Provider::Gemini => self.gemini,
            Provider::OpencodeZen => self.opencode_zen,
            Provider::Copilot => self.copilot,
            Provider::ZaiCodingPlan => self.zai_coding_plan,
        }
    }

    pub fn any_provider(&self) -> bool {
        Provider::ALL.into_iter().any(|p| self.has(p))
    }

    /// Anthropic을 상위 등급(max20)으로 사용 중인지 여부.
    pub fn is_anthropic_max(&self) -> bool {
        self.anthropic && self.anthropic_tier == SubscriptionTier::Max20
    }

    /// 사람이 읽기 쉬운 활성 provider 목록.
    pub fn enabled_ids(&self) -> Vec<&'static str> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.has(*p))
            .map(Provider::id)
            .collect()
    }

    /// 모든 플래그 조합(2^7, tier 포함)을 순회한다. 속성 테스트용.
    pub fn all_combinations() -> impl Iterator<Item = ProviderAvailability> {
        (0u32..128).map(|bits| ProviderAvailability {
            anthropic: bits & 1 != 0,
            anthropic_tier: if bits & 2 != 0 {
                SubscriptionTier::Max20
            } else {
                SubscriptionTier::Standard
            },
            openai: bits & 4 != 0,
            gemini: bits & 8 != 0,
            opencode_zen: bits & 16 != 0,
            copilot: bits & 32 != 0,
            zai_coding_plan: bits & 64 != 0,
        })
    }
}
