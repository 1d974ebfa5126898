//! 저수준 I/O 오류를 설정 오류 분류로 한 번만 변환한다.

use std::io;
use std::path::Path;

use crate::domain::diagnostic::{ConfigError, ConfigErrorKind};

const ENOSPC: i32 = 28;
const EROFS: i32 = 30;

/// `io::Error`를 분류한다. 오류 코드 우선, 그다음 메시지 문자열로 판단한다.
pub fn classify_io_error(err: &io::Error) -> ConfigErrorKind {
    match err.kind() {
        io::ErrorKind::PermissionDenied => return ConfigErrorKind::PermissionDenied,
        io::ErrorKind::NotFound => return ConfigErrorKind::NotFound,
        io::ErrorKind::StorageFull => return ConfigErrorKind::DiskFull,
        io::ErrorKind::ReadOnlyFilesystem => return ConfigErrorKind::ReadOnlyFilesystem,
        _ => {}
    }

    match err.raw_os_error() {
        Some(ENOSPC) => return ConfigErrorKind::DiskFull,
        Some(EROFS) => return ConfigErrorKind::ReadOnlyFilesystem,
        _ => {}
    }

    classify_message(&err.to_string())
}

/// 오류 코드가 없는 경우의 메시지 기반 분류.
pub fn classify_message(message: &str) -> ConfigErrorKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains("eacces") || lower.contains("eperm") || lower.contains("permission denied") {
        ConfigErrorKind::PermissionDenied
    } else if lower.contains("enoent") || lower.contains("no such file") {
        ConfigErrorKind::NotFound
    } else if lower.contains("enospc") || lower.contains("no space left") {
        ConfigErrorKind::DiskFull
    } else if lower.contains("erofs") || lower.contains("read-only file system") {
        ConfigErrorKind::ReadOnlyFilesystem
    } else {
        ConfigErrorKind::Unknown(message.to_string())
    }
}

pub fn io_error(path: &Path, err: &io::Error) -> ConfigError {
    ConfigError::new(path, classify_io_error(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_error_kind() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(classify_io_error(&err), ConfigErrorKind::PermissionDenied);
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(classify_io_error(&err), ConfigErrorKind::NotFound);
    }

    #[test]
    fn classifies_by_raw_os_code() {
        let err = io::Error::from_raw_os_error(ENOSPC);
        assert_eq!(classify_io_error(&err), ConfigErrorKind::DiskFull);
        let err = io::Error::from_raw_os_error(EROFS);
        assert_eq!(classify_io_error(&err), ConfigErrorKind::ReadOnlyFilesystem);
    }

    #[test]
    fn falls_back_to_message_substrings() {
        let err = io::Error::other("write failed: ENOSPC");
        assert_eq!(classify_io_error(&err), ConfigErrorKind::DiskFull);
        assert_eq!(
            classify_message("mount is a read-only file system"),
            ConfigErrorKind::ReadOnlyFilesystem
        );
        assert!(matches!(classify_message("boom"), ConfigErrorKind::Unknown(m) if m == "boom"));
    }
}
