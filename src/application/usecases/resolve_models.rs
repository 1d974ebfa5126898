//! 파일을 쓰지 않고 생성될 자체 설정 문서를 보여주는 유스케이스.

use anyhow::{Context, Result};

use crate::domain::provider::ProviderAvailability;
use crate::domain::resolution::generate_settings;

pub struct ResolveModelsUseCase;

impl ResolveModelsUseCase {
    pub fn execute(&self, availability: &ProviderAvailability) -> Result<String> {
        let generated = generate_settings(availability).to_value();
        serde_json::to_string_pretty(&generated).context("failed to render generated settings")
    }
}
