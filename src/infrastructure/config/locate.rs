//! host 설정 디렉터리 위치 결정.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::application::config::Config;

pub(crate) const OPENCODE_CONFIG_DIR_ENV: &str = "OPENCODE_CONFIG_DIR";

/// 환경변수 또는 홈 디렉터리 기준 기본 위치.
pub fn default_opencode_config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(OPENCODE_CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(".config").join("opencode"))
}

/// 우선순위: 명령행 override > `OPENCODE_CONFIG_DIR` > 설치 도구 설정 > `~/.config/opencode`.
pub fn resolve_config_dir(cli_override: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(OPENCODE_CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = config
        .defaults
        .config_dir
        .as_deref()
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
    {
        return Ok(expand_home(dir));
    }
    match dirs::home_dir() {
        Some(home) => Ok(home.join(".config").join("opencode")),
        None => bail!("cannot determine home directory; pass --config-dir or set {OPENCODE_CONFIG_DIR_ENV}"),
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins() {
        let config = Config::default();
        let dir = resolve_config_dir(Some(Path::new("/tmp/custom")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn plain_paths_are_not_expanded() {
        assert_eq!(expand_home("/opt/opencode"), PathBuf::from("/opt/opencode"));
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
    }
}
