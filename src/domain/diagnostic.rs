//! 설정 파일 작업 실패 분류와 작업 결과 값 객체.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// 실패 원인 분류. 메시지는 사용자가 바로 조치할 수 있는 고정 문장이다.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ConfigErrorKind {
    #[error("permission denied: check ownership and permissions of the config directory")]
    PermissionDenied,

    #[error("file not found or removed while reading: re-run the installer")]
    NotFound,

    #[error("disk is full: free disk space and retry")]
    DiskFull,

    #[error("filesystem is read-only: check the filesystem mount and retry")]
    ReadOnlyFilesystem,

    #[error("syntax error: {0}. Fix the file or delete it and re-run the installer")]
    Syntax(String),

    #[error("file is empty: delete it or supply valid JSON content")]
    Empty,

    #[error("expected a JSON object at the top level but found {0}")]
    WrongShape(String),

    #[error("registry lookup failed: {0}")]
    Network(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// 경로가 붙은 분류 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}: {kind}", path.display())]
pub struct ConfigError {
    pub path: PathBuf,
    pub kind: ConfigErrorKind,
}

impl ConfigError {
    pub fn new(path: impl Into<PathBuf>, kind: ConfigErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// 쓰기 작업 1건의 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigMergeResult {
    pub success: bool,
    pub config_path: PathBuf,
    /// 실제로 파일을 썼는지 여부(변경 없음이면 false)
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ConfigErrorKind>,
    /// 기존 파일을 읽을 수 없어 새로 작성한 경우 그 원인
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_unreadable: Option<ConfigErrorKind>,
}

impl ConfigMergeResult {
    pub fn written(path: &Path) -> Self {
        Self::ok(path, true)
    }

    pub fn unchanged(path: &Path) -> Self {
        Self::ok(path, false)
    }

    fn ok(path: &Path, written: bool) -> Self {
        Self {
            success: true,
            config_path: path.to_path_buf(),
            written,
            error: None,
            error_kind: None,
            replaced_unreadable: None,
        }
    }

    pub fn failed(err: ConfigError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            config_path: err.path,
            written: false,
            error_kind: Some(err.kind),
            replaced_unreadable: None,
        }
    }

    pub fn with_replaced_unreadable(mut self, kind: ConfigErrorKind) -> Self {
        self.replaced_unreadable = Some(kind);
        self
    }
}

impl From<ConfigError> for ConfigMergeResult {
    fn from(err: ConfigError) -> Self {
        Self::failed(err)
    }
}
