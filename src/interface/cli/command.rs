//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::availability::{ProviderArgs, availability_from_args};

#[derive(Debug, Parser)]
#[command(name = "omo-installer")]
#[command(version)]
#[command(about = "Install and configure oh-my-opencode for the opencode host")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Register the plugin and write model assignments for the declared providers
    Install {
        #[command(flatten)]
        providers: ProviderFlags,

        #[command(flatten)]
        target: TargetFlags,

        /// Print the planned changes, do not write any file
        #[arg(long)]
        dry_run: bool,

        /// Skip the latest-version lookup after installing
        #[arg(long)]
        no_update_check: bool,
    },
    /// Print the generated model assignments without writing
    Resolve {
        #[command(flatten)]
        providers: ProviderFlags,

        #[command(flatten)]
        target: TargetFlags,
    },
    /// Show effective installer config, host config format and detected providers
    Config {
        #[command(flatten)]
        target: TargetFlags,
    },
}

/// 생략한 플래그는 기존 설치에서 감지한 값(없으면 no)을 따른다.
#[derive(Debug, Clone, Default, Args)]
pub struct ProviderFlags {
    /// Claude subscription: no, yes, max20
    #[arg(long, value_name = "no|yes|max20")]
    claude: Option<String>,

    /// OpenAI / ChatGPT subscription: no, yes
    #[arg(long, value_name = "no|yes")]
    openai: Option<String>,

    /// Gemini: no, yes
    #[arg(long, value_name = "no|yes")]
    gemini: Option<String>,

    /// GitHub Copilot subscription: no, yes
    #[arg(long, value_name = "no|yes")]
    copilot: Option<String>,

    /// OpenCode Zen: no, yes
    #[arg(long, value_name = "no|yes")]
    opencode_zen: Option<String>,

    /// Z.ai Coding Plan: no, yes
    #[arg(long, value_name = "no|yes")]
    zai_coding_plan: Option<String>,
}

impl From<ProviderFlags> for ProviderArgs {
    fn from(flags: ProviderFlags) -> Self {
        Self {
            claude: flags.claude,
            openai: flags.openai,
            gemini: flags.gemini,
            copilot: flags.copilot,
            opencode_zen: flags.opencode_zen,
            zai_coding_plan: flags.zai_coding_plan,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
struct TargetFlags {
    /// opencode config directory (default: $OPENCODE_CONFIG_DIR or ~/.config/opencode)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

/// 설치 실행 옵션.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub providers: ProviderArgs,
    pub config_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub check_update: bool,
}

pub enum CliAction {
    Install(InstallOptions),
    Resolve {
        providers: ProviderArgs,
        config_dir: Option<PathBuf>,
    },
    InspectConfig {
        config_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Self::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Commands::Install {
                providers,
                target,
                dry_run,
                no_update_check,
            } => Ok(CliAction::Install(InstallOptions {
                providers: validated(providers)?,
                config_dir: target.config_dir,
                dry_run,
                check_update: !no_update_check,
            })),
            Commands::Resolve { providers, target } => Ok(CliAction::Resolve {
                providers: validated(providers)?,
                config_dir: target.config_dir,
            }),
            Commands::Config { target } => Ok(CliAction::InspectConfig {
                config_dir: target.config_dir,
            }),
        }
    }
}

/// 값 형식만 먼저 검사한다. 감지값과의 병합은 설정 디렉터리가 정해진 뒤에 한다.
fn validated(flags: ProviderFlags) -> Result<ProviderArgs, String> {
    let args = ProviderArgs::from(flags);
    availability_from_args(&args, None).map_err(|err| err.to_string())?;
    Ok(args)
}
