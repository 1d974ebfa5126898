//! host 설정/자체 설정 파일 탐지, 파싱, 쓰기.

pub mod errors;
pub mod format;
pub mod jsonc;
pub mod parser;
pub mod writer;

pub use format::{ConfigFormat, DetectedConfig, HOST_CONFIG_JSON, HOST_CONFIG_JSONC, detect_config_format};
pub use parser::{ParsedConfig, parse_config_file, parse_config_text};
