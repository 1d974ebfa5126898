//! 작업 성격(capability)별 fallback chain 정의.

use crate::domain::provider::Provider;

/// 모든 capability가 공유하는 최종 fallback 모델.
pub const ULTIMATE_FALLBACK_MODEL: &str = "opencode/glm-4.7-free";
/// 2차 풀 provider가 제공하는 고정 모델.
pub const SECONDARY_POOL_MODEL: &str = "zai-coding-plan/glm-4.7";

/// 모델이 수행해야 하는 작업 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelCapability {
    HighReasoning,
    LowCost,
    Fast,
    MaxReasoning,
    Vision,
    Creative,
    Writing,
}

/// native provider 순서 목록 + 1차 풀 모델.
#[derive(Debug, Clone, Copy)]
pub struct FallbackChain {
    pub native: &'static [(Provider, &'static str)],
    pub pool_model: &'static str,
}

impl ModelCapability {
    pub const ALL: [ModelCapability; 7] = [
        ModelCapability::HighReasoning,
        ModelCapability::LowCost,
        ModelCapability::Fast,
        ModelCapability::MaxReasoning,
        ModelCapability::Vision,
        ModelCapability::Creative,
        ModelCapability::Writing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModelCapability::HighReasoning => "general-high-reasoning",
            ModelCapability::LowCost => "general-low-cost",
            ModelCapability::Fast => "fast",
            ModelCapability::MaxReasoning => "maximum-reasoning",
            ModelCapability::Vision => "vision-heavy",
            ModelCapability::Creative => "creative",
            ModelCapability::Writing => "prose-writing",
        }
    }

    pub fn chain(self) -> FallbackChain {
        match self {
            ModelCapability::HighReasoning => FallbackChain {
                native: &[
                    (Provider::Anthropic, "anthropic/claude-opus-4-5"),
                    (Provider::OpenAi, "openai/gpt-5.2"),
                    (Provider::Gemini, "google/gemini-3-pro-preview"),
                    (Provider::OpencodeZen, "opencode/claude-opus-4-5"),
                ],
                pool_model: "github-copilot/claude-opus-4.5",
            },
            ModelCapability::LowCost => FallbackChain {
                native: &[
                    (Provider::Anthropic, "anthropic/claude-sonnet-4-5"),
                    (Provider::OpenAi, "openai/gpt-5.2"),
                    (Provider::Gemini, "google/gemini-3-flash-preview"),
                    (Provider::OpencodeZen, "opencode/claude-sonnet-4-5"),
                ],
                pool_model: "github-copilot/claude-sonnet-4.5",
            },
            ModelCapability::Fast => FallbackChain {
                native: &[
                    (Provider::Anthropic, "anthropic/claude-haiku-4-5"),
                    (Provider::Gemini, "google/gemini-3-flash-preview"),
                    (Provider::OpenAi, "openai/gpt-5-nano"),
                    (Provider::OpencodeZen, "opencode/gpt-5-nano"),
                ],
                pool_model: "github-copilot/gpt-5-mini",
            },
            ModelCapability::MaxReasoning => FallbackChain {
                native: &[
                    (Provider::OpenAi, "openai/gpt-5.2"),
                    (Provider::Anthropic, "anthropic/claude-opus-4-5"),
                    (Provider::Gemini, "google/gemini-3-pro-preview"),
                    (Provider::OpencodeZen, "opencode/gpt-5.2"),
                ],
                pool_model: "github-copilot/gpt-5.2",
            },
            ModelCapability::Vision => FallbackChain {
                native: &[
                    (Provider::Gemini, "google/gemini-3-flash-preview"),
                    (Provider::OpenAi, "openai/gpt-5.2"),
                    (Provider::Anthropic, "anthropic/claude-sonnet-4-5"),
                    (Provider::OpencodeZen, "opencode/gemini-3-flash"),
                ],
                pool_model: "github-copilot/gemini-3-flash-preview",
            },
            ModelCapability::Creative => FallbackChain {
                native: &[
                    (Provider::Gemini, "google/gemini-3-pro-preview"),
                    (Provider::Anthropic, "anthropic/claude-opus-4-5"),
                    (Provider::OpenAi, "openai/gpt-5.2"),
                    (Provider::OpencodeZen, "opencode/gemini-3-pro"),
                ],
                pool_model: "github-copilot/gemini-3-pro-preview",
            },
            ModelCapability::Writing => FallbackChain {
                native: &[
                    (Provider::Gemini, "google/gemini-3-flash-preview"),
                    (Provider::Anthropic, "anthropic/claude-sonnet-4-5"),
                    (Provider::OpenAi, "openai/gpt-5.2"),
                    (Provider::OpencodeZen, "opencode/gemini-3-flash"),
                ],
                pool_model: "github-copilot/gemini-3-flash-preview",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_are_non_empty_and_prefixed_by_their_provider() {
        for capability in ModelCapability::ALL {
            let chain = capability.chain();
            assert!(!chain.native.is_empty(), "{}", capability.label());
            for (provider, model) in chain.native {
                assert_eq!(Provider::from_model_id(model), Some(*provider), "{model}");
            }
            assert_eq!(Provider::from_model_id(chain.pool_model), Some(Provider::Copilot));
        }
    }

    #[test]
    fn pool_and_fallback_constants_belong_to_expected_providers() {
        assert_eq!(
            Provider::from_model_id(SECONDARY_POOL_MODEL),
            Some(Provider::ZaiCodingPlan)
        );
        assert_eq!(
            Provider::from_model_id(ULTIMATE_FALLBACK_MODEL),
            Some(Provider::OpencodeZen)
        );
    }
}
