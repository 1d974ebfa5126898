//! omo-installer library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::path::Path;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::ports::ConfigRepository;
use infrastructure::adapters::JsonConfigRepository;
use interface::cli::{InstallOptions, run_install};
use interface::composition::AppComposition;

/// 라이브러리 직접 호출용 설치 함수. 종료 코드를 반환한다.
pub async fn install(options: InstallOptions) -> Result<i32> {
    let composition = AppComposition::new(JsonConfigRepository.load()?);
    run_install(&composition, options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json(config_dir: Option<&Path>) -> Result<String> {
    let composition = AppComposition::new(JsonConfigRepository.load()?);
    let ctx = composition.context(config_dir)?;
    composition.inspect_config_usecase().execute(&ctx)
}
