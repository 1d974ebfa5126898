//! 원시 인자(플래그 문자열) → `ProviderAvailability` 변환.
//!
//! 명시한 인자가 우선이고, 생략한 인자는 update 모드에서 감지한 기존 값, 그마저 없으면 `no`.

use anyhow::{Result, bail};

use crate::domain::provider::{ProviderAvailability, SubscriptionTier};

/// 대화형 마법사/명령행 인자에서 넘어온 원시 값.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderArgs {
    /// no | yes | max20
    pub claude: Option<String>,
    pub openai: Option<String>,
    pub gemini: Option<String>,
    pub copilot: Option<String>,
    pub opencode_zen: Option<String>,
    pub zai_coding_plan: Option<String>,
}

fn parse_yes_no(flag: &str, raw: Option<&str>, seed: bool) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(seed);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => bail!("invalid value for --{flag}: {other:?} (expected: no, yes)"),
    }
}

fn parse_claude(
    raw: Option<&str>,
    seed: &ProviderAvailability,
) -> Result<(bool, SubscriptionTier)> {
    let Some(raw) = raw else {
        return Ok((seed.anthropic, seed.anthropic_tier));
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "no" | "n" | "false" => Ok((false, SubscriptionTier::Standard)),
        "yes" | "y" | "true" => Ok((true, SubscriptionTier::Standard)),
        "max20" => Ok((true, SubscriptionTier::Max20)),
        other => bail!("invalid value for --claude: {other:?} (expected: no, yes, max20)"),
    }
}

/// 원시 인자와 (있다면) 감지된 기존 구성으로 사용 가능 여부를 만든다.
pub fn availability_from_args(
    args: &ProviderArgs,
    detected: Option<&ProviderAvailability>,
) -> Result<ProviderAvailability> {
    let seed = detected.copied().unwrap_or_default();
    let (anthropic, anthropic_tier) = parse_claude(args.claude.as_deref(), &seed)?;

    Ok(ProviderAvailability {
        anthropic,
        anthropic_tier,
        openai: parse_yes_no("openai", args.openai.as_deref(), seed.openai)?,
        gemini: parse_yes_no("gemini", args.gemini.as_deref(), seed.gemini)?,
        opencode_zen: parse_yes_no("opencode-zen", args.opencode_zen.as_deref(), seed.opencode_zen)?,
        copilot: parse_yes_no("copilot", args.copilot.as_deref(), seed.copilot)?,
        zai_coding_plan: parse_yes_no(
            "zai-coding-plan",
            args.zai_coding_plan.as_deref(),
            seed.zai_coding_plan,
        )?,
    })
}

/// 마법사 초기값 표시용 역변환.
pub fn args_from_availability(availability: &ProviderAvailability) -> ProviderArgs {
    let yes_no = |flag: bool| Some(if flag { "yes" } else { "no" }.to_string());
    let claude = match (availability.anthropic, availability.anthropic_tier) {
        (false, _) => "no",
        (true, SubscriptionTier::Standard) => "yes",
        (true, SubscriptionTier::Max20) => "max20",
    };

    ProviderArgs {
        claude: Some(claude.to_string()),
        openai: yes_no(availability.openai),
        gemini: yes_no(availability.gemini),
        copilot: yes_no(availability.copilot),
        opencode_zen: yes_no(availability.opencode_zen),
        zai_coding_plan: yes_no(availability.zai_coding_plan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_args_default_to_no() {
        let availability = availability_from_args(&ProviderArgs::default(), None).unwrap();
        assert!(!availability.any_provider());
    }

    #[test]
    fn explicit_args_override_detected_seed() {
        let seed = ProviderAvailability {
            anthropic: true,
            anthropic_tier: SubscriptionTier::Max20,
            gemini: true,
            ..Default::default()
        };
        let args = ProviderArgs {
            gemini: Some("no".to_string()),
            copilot: Some("yes".to_string()),
            ..Default::default()
        };

        let availability = availability_from_args(&args, Some(&seed)).unwrap();
        assert!(availability.is_anthropic_max());
        assert!(!availability.gemini);
        assert!(availability.copilot);
    }

    #[test]
    fn invalid_values_name_the_flag() {
        let args = ProviderArgs {
            claude: Some("max5".to_string()),
            ..Default::default()
        };
        let err = availability_from_args(&args, None).unwrap_err().to_string();
        assert!(err.contains("--claude"), "{err}");

        let args = ProviderArgs {
            zai_coding_plan: Some("maybe".to_string()),
            ..Default::default()
        };
        let err = availability_from_args(&args, None).unwrap_err().to_string();
        assert!(err.contains("--zai-coding-plan"), "{err}");
    }

    #[test]
    fn args_round_trip_through_availability() {
        let availability = ProviderAvailability {
            anthropic: true,
            anthropic_tier: SubscriptionTier::Max20,
            openai: true,
            zai_coding_plan: true,
            ..Default::default()
        };
        let args = args_from_availability(&availability);
        assert_eq!(args.claude.as_deref(), Some("max20"));
        assert_eq!(availability_from_args(&args, None).unwrap(), availability);
    }
}
