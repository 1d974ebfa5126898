//! 애플리케이션 유스케이스 모음.

pub mod check_update;
pub mod detect_providers;
pub mod inspect_config;
pub mod install;
pub mod plugin_version;
pub mod resolve_models;
