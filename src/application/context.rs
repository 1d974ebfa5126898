//! 실행 1회 동안 고정되는 설치 대상 컨텍스트.
//!
//! 프로세스 시작 시 한 번 만들고 유스케이스에 인자로 전달한다.

use std::path::{Path, PathBuf};

use crate::domain::plugin::PACKAGE_NAME;

pub const SETTINGS_FILE_NAME: &str = "oh-my-opencode.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    config_dir: PathBuf,
    current_version: String,
    package_name: String,
}

impl InstallContext {
    pub fn new(config_dir: impl Into<PathBuf>, current_version: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            current_version: current_version.into(),
            package_name: PACKAGE_NAME.to_string(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }
}
